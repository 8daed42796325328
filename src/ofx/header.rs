use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

/// The keys of an OFX 1.x header block, with the values written by default.
pub const DEFAULT_HEADERS: [(&str, &str); 9] = [
    ("OFXHEADER", "100"),
    ("DATA", "OFXSGML"),
    ("VERSION", "102"),
    ("SECURITY", "NONE"),
    ("ENCODING", "USASCII"),
    ("CHARSET", "1252"),
    ("COMPRESSION", "NONE"),
    ("OLDFILEUID", "NONE"),
    ("NEWFILEUID", "NONE"),
];

/// The `KEY:VALUE` header block preceding the `<OFX>` element.
///
/// Keys are unique, upper-cased and kept in insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Headers {
    entries: IndexMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard OFX 1.0.2 SGML header block.
    pub fn default_headers() -> Self {
        DEFAULT_HEADERS.into_iter().collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key.trim().to_ascii_uppercase().as_str())
            .map(String::as_str)
    }

    /// Sets a header. Replacing an existing key keeps its position.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(key.as_ref().trim().to_ascii_uppercase(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `VERSION` header, `"100"` when absent.
    pub fn version(&self) -> &str {
        self.get("VERSION").unwrap_or("100")
    }
}

impl Index<&str> for Headers {
    type Output = str;

    /// Returns the header value, or `""` when the key is absent.
    fn index(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (key, value) in iter {
            headers.set(key, value);
        }
        headers
    }
}

/// Writes the block as `KEY:VALUE` lines followed by a blank line.
impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            write!(f, "{key}:{value}\r\n")?;
        }
        f.write_str("\r\n")
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers__default_headers() {
        let headers = Headers::default_headers();

        assert_eq!(headers.len(), 9);
        assert_eq!(headers.version(), "102");
        assert_eq!(&headers["DATA"], "OFXSGML");
        assert_eq!(&headers["charset"], "1252");
    }

    #[test]
    fn headers__missing_key() {
        let headers = Headers::new();

        assert_eq!(headers.version(), "100");
        assert_eq!(&headers["SECURITY"], "");
        assert!(!headers.contains_key("SECURITY"));
    }

    #[test]
    fn headers__set_replaces_in_place() {
        let mut headers = Headers::default_headers();
        headers.set("version", "151");
        headers.set("X-CUSTOM", "1");

        let keys: Vec<_> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys[2], "VERSION");
        assert_eq!(keys.last(), Some(&"X-CUSTOM"));
        assert_eq!(headers.version(), "151");
        assert_eq!(headers.len(), 10);
    }

    #[test]
    fn headers__display() {
        let headers: Headers = [("OFXHEADER", "100"), ("DATA", "OFXSGML")].into_iter().collect();

        assert_eq!(headers.to_string(), "OFXHEADER:100\r\nDATA:OFXSGML\r\n\r\n");
    }
}
