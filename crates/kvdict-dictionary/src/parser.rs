//! Parse `key:value` dictionary lines

/// Split a dictionary line on its first colon
///
/// Returns `None` for malformed lines: no colon, an empty key (leading colon),
/// or an empty value (colon is the last character). Colons after the first one
/// belong to the value and are kept verbatim. Nothing is trimmed.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        assert_eq!(parse_line("a:1"), Some(("a", "1")));
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        assert_eq!(
            parse_line("url:http://example.com:8080"),
            Some(("url", "http://example.com:8080"))
        );
        assert_eq!(parse_line("k::"), Some(("k", ":")));
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(parse_line("noColon"), None);
        assert_eq!(parse_line(":missingKey"), None);
        assert_eq!(parse_line("trailingColon:"), None);
        assert_eq!(parse_line(":"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_whitespace_is_preserved() {
        assert_eq!(parse_line(" key : value "), Some((" key ", " value ")));
    }

    #[test]
    fn test_multibyte_keys_and_values() {
        assert_eq!(parse_line("größe:Größe"), Some(("größe", "Größe")));
        assert_eq!(parse_line("日本:にほん"), Some(("日本", "にほん")));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a colon-free key and any non-empty value survive the split
        #[test]
        fn test_first_colon_splits(key in "[^:\\n]{1,16}", value in "[^\\n]{1,16}") {
            let line = format!("{}:{}", key, value);
            prop_assert_eq!(parse_line(&line), Some((key.as_str(), value.as_str())));
        }

        /// Property: lines without a colon are always malformed
        #[test]
        fn test_no_colon_is_malformed(line in "[^:]{0,32}") {
            prop_assert_eq!(parse_line(&line), None);
        }
    }
}
