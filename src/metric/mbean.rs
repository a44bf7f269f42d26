//! MBean string helpers

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// MBean split into object name and composite key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeKey<'a> {
    pub mbean: &'a str,
    pub key: &'a str,
}

/// Split a trailing `.key` suffix off an MBean string
///
/// A key is recognised only when the last `.` comes after the last space,
/// so `"type=Memory HeapMemoryUsage.used"` yields key `used` while
/// `"type=a.b Attr"` has no key.
pub fn resolve_attribute_key(mbean: &str) -> Option<AttributeKey<'_>> {
    // Backward scan: whichever of '.' or ' ' shows up first decides.
    let pos = mbean.rfind(|c: char| c == '.' || c == ' ')?;
    if mbean[pos..].starts_with('.') {
        Some(AttributeKey {
            mbean: &mbean[..pos],
            key: &mbean[pos + 1..],
        })
    } else {
        None
    }
}

/// How spaces inside an MBean name are escaped for the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EscapeStyle {
    /// Double when the host path separator is `/`, single otherwise
    #[default]
    Auto,
    /// `\ `
    Single,
    /// `\\ `, survives one extra round of shell unquoting
    Double,
}

impl EscapeStyle {
    /// Resolve `Auto` against the running platform
    pub fn resolve(self) -> Self {
        match self {
            EscapeStyle::Auto if std::path::MAIN_SEPARATOR == '/' => EscapeStyle::Double,
            EscapeStyle::Auto => EscapeStyle::Single,
            other => other,
        }
    }

    /// Replacement text for one escaped space
    pub fn escaped_space(self) -> &'static str {
        match self.resolve() {
            EscapeStyle::Double => "\\\\ ",
            _ => "\\ ",
        }
    }
}

impl std::fmt::Display for EscapeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscapeStyle::Auto => write!(f, "auto"),
            EscapeStyle::Single => write!(f, "single"),
            EscapeStyle::Double => write!(f, "double"),
        }
    }
}

/// Escape every space but the last one
///
/// The last space separates the object name from the attribute on the
/// client's command line and stays as it is.
pub fn escape_spaces(mbean: &str, style: EscapeStyle) -> String {
    let Some(last) = mbean.rfind(' ') else {
        return mbean.to_string();
    };

    let (head, tail) = mbean.split_at(last);
    let mut escaped = head.replace(' ', style.escaped_space());
    escaped.push_str(tail);
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_after_last_dot() {
        let attr = resolve_attribute_key("domain.attr.key").unwrap();
        assert_eq!(attr.mbean, "domain.attr");
        assert_eq!(attr.key, "key");
    }

    #[test]
    fn test_composite_attribute() {
        let attr = resolve_attribute_key("type=Memory HeapMemoryUsage.used").unwrap();
        assert_eq!(attr.mbean, "type=Memory HeapMemoryUsage");
        assert_eq!(attr.key, "used");
    }

    #[test]
    fn test_no_key() {
        assert_eq!(resolve_attribute_key("attr with space"), None);
        assert_eq!(resolve_attribute_key("plain"), None);
        assert_eq!(resolve_attribute_key(""), None);
        // Dot only before the last space
        assert_eq!(resolve_attribute_key("name=a.b Attr"), None);
    }

    #[test]
    fn test_trailing_dot_yields_empty_key() {
        let attr = resolve_attribute_key("type=Memory Heap.").unwrap();
        assert_eq!(attr.mbean, "type=Memory Heap");
        assert_eq!(attr.key, "");
    }

    #[test]
    fn test_escape_all_but_last_space() {
        assert_eq!(
            escape_spaces(
                "type=Garbage Collector,name=PS Scavenge CollectionCount",
                EscapeStyle::Single
            ),
            "type=Garbage\\ Collector,name=PS\\ Scavenge CollectionCount"
        );
        assert_eq!(
            escape_spaces("name=PS Scavenge CollectionCount", EscapeStyle::Double),
            "name=PS\\\\ Scavenge CollectionCount"
        );
    }

    #[test]
    fn test_escape_one_or_no_space() {
        assert_eq!(
            escape_spaces("type=Memory Heap", EscapeStyle::Double),
            "type=Memory Heap"
        );
        assert_eq!(escape_spaces("plain", EscapeStyle::Single), "plain");
    }

    #[test]
    fn test_escape_leaves_exactly_one_bare_space() {
        let escaped = escape_spaces("a b c d e", EscapeStyle::Single);
        assert_eq!(escaped, "a\\ b\\ c\\ d e");
        let bare = escaped
            .char_indices()
            .filter(|(i, c)| *c == ' ' && !escaped[..*i].ends_with('\\'))
            .count();
        assert_eq!(bare, 1);
    }

    #[test]
    fn test_auto_style_follows_path_separator() {
        let expected = if std::path::MAIN_SEPARATOR == '/' {
            EscapeStyle::Double
        } else {
            EscapeStyle::Single
        };
        assert_eq!(EscapeStyle::Auto.resolve(), expected);
        assert_eq!(EscapeStyle::Single.resolve(), EscapeStyle::Single);
    }
}
