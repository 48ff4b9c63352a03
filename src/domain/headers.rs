use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Ordered, case-insensitive header lookup.
///
/// Names are stored trimmed and lower-cased. Inserting a name that is already
/// present replaces its value in place, so the first-seen order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
    /// Normalized name -> position in `entries`.
    index: HashMap<String, usize>,
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let slot = *self.index.get(&normalize_name(name))?;
        Some(self.entries[slot].1.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Store `value` under `name`, overwriting an earlier value. Returns the
    /// slot the value lives in, for [`HeaderMap::append_folded`].
    pub(crate) fn insert(&mut self, name: &str, value: &str) -> usize {
        let key = normalize_name(name);
        let value = value.trim().to_string();
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
            return slot;
        }
        let slot = self.entries.len();
        self.index.insert(key.clone(), slot);
        self.entries.push((key, value));
        slot
    }

    /// Join a folded line onto the value in `slot` with a single space.
    pub(crate) fn append_folded(&mut self, slot: usize, text: &str) {
        if let Some((_, value)) = self.entries.get_mut(slot) {
            value.push(' ');
            value.push_str(text.trim());
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (k, v) in iter {
            map.insert(k.as_ref(), v.as_ref());
        }
        map
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_padding() {
        let map: HeaderMap = [("X-Stega-Signature", " abc ")].into_iter().collect();
        assert_eq!(map.get("x-stega-signature"), Some("abc"));
        assert_eq!(map.get("X-STEGA-SIGNATURE"), Some("abc"));
        assert_eq!(map.get(" x-stega-signature "), Some("abc"));
        assert!(!map.contains_key("x-stega-verdict"));
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let map: HeaderMap = [("A", "1"), ("B", "2"), ("a", "3")].into_iter().collect();
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn many_repeated_names_share_one_slot() {
        let mut map = HeaderMap::new();
        for i in 0..1000 {
            map.insert("Received", &format!("hop {i}"));
            map.insert(&format!("X-Trace-{i}"), "t");
        }
        assert_eq!(map.len(), 1001);
        assert_eq!(map.get("received"), Some("hop 999"));
        assert_eq!(map.iter().next(), Some(("received", "hop 999")));
        assert_eq!(map.get("x-trace-500"), Some("t"));
    }

    #[test]
    fn folded_text_goes_to_its_slot() {
        let mut map = HeaderMap::new();
        map.insert("A", "1");
        let slot = map.insert("B", "2");
        map.append_folded(slot, "   more  ");
        assert_eq!(map.get("b"), Some("2 more"));
        assert_eq!(map.get("a"), Some("1"));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let map: HeaderMap = [("Subject", "hi"), ("From", "a@b.c")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"subject":"hi","from":"a@b.c"}"#);
    }
}
