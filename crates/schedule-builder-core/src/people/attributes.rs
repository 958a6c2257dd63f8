use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// Free-form attributes of a person, kept in insertion order.
///
/// Editing addresses attributes by position, so positions never move except
/// when an attribute before them is removed. Keys are unique and non-blank:
/// an edit that would collide with another position's key or blank the key
/// is rejected and leaves the attributes untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs, rejecting blank or repeated keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attrs = Self::new();
        for (key, value) in pairs {
            attrs.push(key, value)?;
        }
        Ok(attrs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn at(&self, index: usize) -> Option<&Attribute> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    /// Append an attribute and return its position.
    pub fn push(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<usize, StoreError> {
        let key = normalize_key(key.into())?;
        self.ensure_unique(&key, None)?;
        self.0.push(Attribute {
            key,
            value: value.into(),
        });
        Ok(self.0.len() - 1)
    }

    /// Rewrite the key and value at `index`.
    pub fn update(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.check_index(index)?;
        let key = normalize_key(key.into())?;
        self.ensure_unique(&key, Some(index))?;
        self.0[index] = Attribute {
            key,
            value: value.into(),
        };
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Attribute, StoreError> {
        self.check_index(index)?;
        Ok(self.0.remove(index))
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index >= self.0.len() {
            return Err(StoreError::AttributeIndexOutOfBounds {
                index,
                len: self.0.len(),
            });
        }
        Ok(())
    }

    fn ensure_unique(&self, key: &str, skip: Option<usize>) -> Result<(), StoreError> {
        let taken = self
            .0
            .iter()
            .enumerate()
            .any(|(i, a)| Some(i) != skip && a.key == key);
        if taken {
            return Err(StoreError::DuplicateAttributeKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<Attribute>> for Attributes {
    type Error = StoreError;

    fn try_from(attrs: Vec<Attribute>) -> Result<Self, Self::Error> {
        Self::from_pairs(attrs.into_iter().map(|a| (a.key, a.value)))
    }
}

impl From<Attributes> for Vec<Attribute> {
    fn from(attrs: Attributes) -> Self {
        attrs.0
    }
}

fn normalize_key(key: String) -> Result<String, StoreError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyAttributeKey);
    }
    Ok(trimmed.to_string())
}
