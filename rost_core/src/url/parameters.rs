use std::collections::HashMap;

/// Named route parameters.
///
/// Keeps insertion order (used for the query string of an assembled URL).
/// Setting an existing name replaces its value in place. Equality ignores
/// order.
#[derive(Debug, Clone, Default, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `name` set to `value`.
    pub fn with<K: Into<String>, V: ToString>(mut self, name: K, value: V) -> Self {
        self.set(name.into(), value.to_string());
        self
    }

    pub(crate) fn set(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns true if there is a parameter with the given name.
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `self` laid over `base`: values from `self` win, names only in `base`
    /// are kept.
    pub fn merged_over(&self, base: &Parameters) -> Parameters {
        let mut merged = base.clone();
        for (name, value) in &self.entries {
            merged.set(name.clone(), value.clone());
        }
        merged
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.entries.into_iter().collect()
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Parameters::new();
        for (name, value) in iter {
            parameters.set(name.into(), value.to_string());
        }
        parameters
    }
}

impl From<HashMap<String, String>> for Parameters {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}
