use std::fmt::Debug;

use hashbrown::HashMap;

use crate::fieldvalue::FieldValue;

/// in-memory record instance: field name to value, in insertion order.
///
/// records are plain data owned by the caller; encoder and decoder only borrow them for the
/// duration of a call.
#[derive(Clone, Default)]
pub struct Record {
    entries: Vec<(String, FieldValue)>,
    // name -> position in entries
    index: HashMap<String, usize>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// builder-style [`Record::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// sets a field, replacing (in place) and returning the previous value if there was one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        let name = name.into();
        let value = value.into();
        if let Some(&i) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value));
        None
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let i = self.index.remove(name)?;
        let (_, value) = self.entries.remove(i);
        for (n, _) in &self.entries[i..] {
            if let Some(pos) = self.index.get_mut(n.as_str()) {
                *pos -= 1;
            }
        }
        Some(value)
    }

    /// moves every field of `other` into `self`, overwriting fields with the same name.
    pub fn merge(&mut self, other: Record) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
