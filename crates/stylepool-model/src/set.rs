use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Attr, AttrKind};

/// A set of cell formatting attributes, at most one per [`AttrKind`].
///
/// Iteration follows the kind order, so structurally equal sets compare and
/// hash identically regardless of insertion order. This makes `AttrSet`
/// usable as an interning key.
///
/// Serialized as a plain sequence of attributes; later entries for a kind
/// win on deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AttrSet {
    attrs: BTreeMap<AttrKind, Attr>,
}

impl AttrSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the attribute for its kind, returning the
    /// displaced value.
    pub fn put(&mut self, attr: Attr) -> Option<Attr> {
        self.attrs.insert(attr.kind(), attr)
    }

    /// Put every attribute of `other` over `self`.
    ///
    /// Slots present only in `self` are left untouched.
    pub fn merge_from(&mut self, other: &AttrSet) {
        for attr in other.iter() {
            self.put(attr.clone());
        }
    }

    pub fn get(&self, kind: AttrKind) -> Option<&Attr> {
        self.attrs.get(&kind)
    }

    pub fn remove(&mut self, kind: AttrKind) -> Option<Attr> {
        self.attrs.remove(&kind)
    }

    pub fn contains(&self, kind: AttrKind) -> bool {
        self.attrs.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Attributes in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.values()
    }
}

impl FromIterator<Attr> for AttrSet {
    fn from_iter<I: IntoIterator<Item = Attr>>(iter: I) -> Self {
        let mut set = AttrSet::new();
        for attr in iter {
            set.put(attr);
        }
        set
    }
}

impl Extend<Attr> for AttrSet {
    fn extend<I: IntoIterator<Item = Attr>>(&mut self, iter: I) {
        for attr in iter {
            self.put(attr);
        }
    }
}

impl Serialize for AttrSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AttrSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let attrs = Vec::<Attr>::deserialize(deserializer)?;
        Ok(attrs.into_iter().collect())
    }
}
