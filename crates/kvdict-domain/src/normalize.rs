//! Key normalization

use std::borrow::Cow;

/// Normalize a dictionary key or lookup input.
///
/// With `ignore_case` the text is lowercased using the Unicode default case
/// mapping, which does not depend on the process locale. Otherwise the text is
/// returned untouched and no allocation happens.
pub fn normalize(text: &str, ignore_case: bool) -> Cow<'_, str> {
    if ignore_case {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    }
}
