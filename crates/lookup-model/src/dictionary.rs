use std::collections::HashMap;

/// Immutable key to value table used for record lookups.
///
/// Lookups are exact: case-sensitive, untrimmed. Once built the table is
/// never mutated, so one instance can be shared behind an `Arc` by every
/// worker transforming records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
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

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }
}

impl From<HashMap<String, String>> for Dictionary {
    fn from(entries: HashMap<String, String>) -> Self {
        Self::new(entries)
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        let dictionary: Dictionary = [("nicolas", "cage")].into_iter().collect();
        assert_eq!(dictionary.get("nicolas"), Some("cage"));
        assert_eq!(dictionary.get("Nicolas"), None);
        assert_eq!(dictionary.get(" nicolas"), None);
    }
}
