use ahash::AHashMap;
use stylepool_model::{Attr, AttrSet};

/// A pooled value: a single formatting attribute or a whole attribute set.
///
/// Both shapes live in one pool so that a cache's single-attribute patch
/// and its set results share the same reference-count discipline.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    Attr(Attr),
    Set(AttrSet),
}

impl Item {
    /// The attribute set behind this item, if it is one.
    pub fn as_set(&self) -> Option<&AttrSet> {
        match self {
            Item::Set(set) => Some(set),
            Item::Attr(_) => None,
        }
    }

    /// The single attribute behind this item, if it is one.
    pub fn as_attr(&self) -> Option<&Attr> {
        match self {
            Item::Attr(attr) => Some(attr),
            Item::Set(_) => None,
        }
    }
}

/// Handle to a pooled item.
///
/// Handles compare by pool slot, never by value: two structurally equal
/// items interned into one pool share a single id. A handle is only
/// meaningful against the pool that issued it, and only while the entry it
/// names is still referenced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw slot value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Entry {
    item: Item,
    refs: u32,
}

/// Deduplicating, reference-counted store of formatting items.
///
/// [`ItemPool::intern`] maps structurally equal values onto one canonical
/// slot. Counts are caller-managed: interning takes no reference of its
/// own; every party that keeps or hands out an id takes counts through
/// [`ItemPool::add_ref`] and returns them through [`ItemPool::release`].
/// An entry whose count drops to zero is freed and its slot recycled.
///
/// Using an id after its entry was freed is a contract violation, caught
/// by the occupancy checks rather than reported as an error.
#[derive(Debug, Default)]
pub struct ItemPool {
    entries: Vec<Option<Entry>>,
    free: Vec<u32>,
    index: AHashMap<Item, ItemId>,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical id for `item`, allocating a slot on first sight.
    ///
    /// A fresh entry starts with zero references.
    pub fn intern(&mut self, item: Item) -> ItemId {
        if let Some(&id) = self.index.get(&item) {
            return id;
        }
        let id = match self.free.pop() {
            Some(slot) => ItemId(slot),
            None => {
                self.entries.push(None);
                ItemId((self.entries.len() - 1) as u32)
            }
        };
        self.index.insert(item.clone(), id);
        self.entries[id.index()] = Some(Entry { item, refs: 0 });
        id
    }

    /// Increment the reference count of `id` by `n`.
    pub fn add_ref(&mut self, id: ItemId, n: u32) {
        self.entry_mut(id).refs += n;
    }

    /// Release one reference; at zero the entry is freed and its slot
    /// recycled.
    pub fn release(&mut self, id: ItemId) {
        let entry = self.entry_mut(id);
        debug_assert!(entry.refs > 0, "release of unreferenced item {id:?}");
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs == 0 {
            if let Some(freed) = self.entries[id.index()].take() {
                self.index.remove(&freed.item);
                self.free.push(id.as_u32());
                log::trace!("freed pooled item {id:?}");
            }
        }
    }

    /// The pooled value behind `id`.
    pub fn get(&self, id: ItemId) -> &Item {
        &self.entry(id).item
    }

    /// Current reference count of `id`.
    pub fn ref_count(&self, id: ItemId) -> u32 {
        self.entry(id).refs
    }

    /// Whether `id` names a live entry in this pool.
    pub fn contains(&self, id: ItemId) -> bool {
        self.entries
            .get(id.index())
            .map_or(false, |slot| slot.is_some())
    }

    /// Number of live pooled items.
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, id: ItemId) -> &Entry {
        match self.entries.get(id.index()).and_then(Option::as_ref) {
            Some(entry) => entry,
            None => panic!("no pooled item for {id:?}"),
        }
    }

    fn entry_mut(&mut self, id: ItemId) -> &mut Entry {
        match self.entries.get_mut(id.index()).and_then(Option::as_mut) {
            Some(entry) => entry,
            None => panic!("no pooled item for {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylepool_model::AttrKind;

    fn sized(size_100pt: u16) -> Item {
        Item::Set([Attr::FontSize(size_100pt)].into_iter().collect())
    }

    #[test]
    fn intern_dedups_structurally_equal_items() {
        let mut pool = ItemPool::new();
        let a = pool.intern(sized(1100));
        let b = pool.intern(sized(1100));
        let c = pool.intern(sized(1200));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.ref_count(a), 0);
    }

    #[test]
    fn attr_and_set_items_do_not_collide() {
        let mut pool = ItemPool::new();
        let attr = pool.intern(Item::Attr(Attr::Bold(true)));
        let set = pool.intern(Item::Set([Attr::Bold(true)].into_iter().collect()));
        assert_ne!(attr, set);
        assert_eq!(pool.get(attr).as_attr(), Some(&Attr::Bold(true)));
        assert!(pool.get(set).as_set().unwrap().contains(AttrKind::Bold));
    }

    #[test]
    fn release_frees_at_zero_and_recycles_the_slot() {
        let mut pool = ItemPool::new();
        let a = pool.intern(sized(1100));
        pool.add_ref(a, 2);
        pool.release(a);
        assert!(pool.contains(a));
        pool.release(a);
        assert!(!pool.contains(a));
        assert!(pool.is_empty());

        // A fresh intern reuses the freed slot under a new canonical value.
        let b = pool.intern(sized(1300));
        assert_eq!(b.as_u32(), a.as_u32());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn reintern_after_free_is_a_fresh_entry() {
        let mut pool = ItemPool::new();
        let a = pool.intern(sized(1100));
        pool.add_ref(a, 1);
        pool.release(a);
        let again = pool.intern(sized(1100));
        assert_eq!(pool.ref_count(again), 0);
    }

    #[test]
    #[should_panic(expected = "no pooled item")]
    fn get_on_freed_id_panics() {
        let mut pool = ItemPool::new();
        let a = pool.intern(sized(1100));
        pool.add_ref(a, 1);
        pool.release(a);
        let _ = pool.get(a);
    }
}
