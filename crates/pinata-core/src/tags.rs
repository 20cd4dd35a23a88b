//! PGN tag pairs attached to a game.

/// A single `[Key "Value"]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub key: String,
    pub value: String,
}

/// Ordered tag store. Keys are unique; insertion order is kept so a file
/// written back out lists its tags the way it was read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pairs: Vec<TagPair>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
            .unwrap_or("")
    }

    /// Overwrite `key` in place, or append it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|p| p.key == key) {
            Some(pair) => pair.value = value,
            None => self.pairs.push(TagPair {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.pairs.iter().position(|p| p.key == key)?;
        Some(self.pairs.remove(idx).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagPair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
