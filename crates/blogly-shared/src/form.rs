//! Reader for `application/x-www-form-urlencoded` bodies.
//!
//! Multi-select fields arrive as the same key repeated once per selected
//! value (`tags=1&tags=3`), which is why the pairs are kept as a list.

/// Decoded key/value pairs of a submitted form.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or an empty string when the field is missing.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Every value for `key` that parses as an id; anything else is ignored.
    pub fn ids(&self, key: &str) -> Vec<i32> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .filter_map(|(_, v)| v.trim().parse().ok())
            .collect()
    }
}
