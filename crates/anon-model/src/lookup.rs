use std::collections::HashMap;

/// Case-insensitive view over a set of column names.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.to_ascii_lowercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Returns the name as originally spelled, if present in any casing.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }
}
