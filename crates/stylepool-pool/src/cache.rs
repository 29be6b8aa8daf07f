use smallvec::SmallVec;
use stylepool_model::{Attr, AttrSet};

use crate::pool::{Item, ItemId, ItemPool};

/// The fixed delta a [`PatchCache`] applies to every original it sees.
#[derive(Debug)]
enum Patch {
    /// Single replacement attribute, interned into the pool and held for
    /// the cache's lifetime.
    Attr(ItemId),
    /// Replacement set, merged over each original.
    Set(AttrSet),
}

#[derive(Copy, Clone, Debug)]
struct MemoEntry {
    original: ItemId,
    result: ItemId,
}

/// Hit/miss counters for one cache lifetime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Applies one fixed formatting delta to pooled attribute sets,
/// materializing each distinct result at most once.
///
/// Bulk formatting changes request the same transformation for many cells
/// or paragraphs; without memoization every request would clone, mutate
/// and re-intern an identical set. The cache keeps an insertion-ordered
/// memo of `original -> result` pairs and resolves repeats by id with a
/// linear scan (per-operation caches stay small).
///
/// The cache borrows its pool exclusively, so all pool traffic during the
/// bulk operation flows through [`PatchCache::apply`]. References taken by
/// the memo table are returned to the pool when the cache is dropped.
pub struct PatchCache<'p> {
    pool: &'p mut ItemPool,
    patch: Patch,
    memo: SmallVec<[MemoEntry; 8]>,
    stats: CacheStats,
}

impl<'p> PatchCache<'p> {
    /// Cache that puts one attribute into every original set.
    pub fn for_attr(pool: &'p mut ItemPool, attr: Attr) -> Self {
        let id = pool.intern(Item::Attr(attr));
        pool.add_ref(id, 1);
        Self {
            pool,
            patch: Patch::Attr(id),
            memo: SmallVec::new(),
            stats: CacheStats::default(),
        }
    }

    /// Cache that merges a whole replacement set over every original set.
    pub fn for_set(pool: &'p mut ItemPool, set: AttrSet) -> Self {
        Self {
            pool,
            patch: Patch::Set(set),
            memo: SmallVec::new(),
            stats: CacheStats::default(),
        }
    }

    /// The patched, pooled counterpart of `original`.
    ///
    /// `original` must name a pooled [`Item::Set`]. The first call for a
    /// given original clones its set, applies the delta and interns the
    /// result; repeated calls return the memoized id without touching the
    /// set again.
    ///
    /// Reference accounting per call:
    /// - the materializing call registers the original with the pool once
    ///   more and leaves one memo-held reference on the result;
    /// - a result that differs from its original is additionally returned
    ///   with one reference credited to the caller, and memo hits repeat
    ///   both the credit and the registration;
    /// - a memoized no-op (result is the original itself) is returned with
    ///   no bookkeeping at all.
    pub fn apply(&mut self, original: ItemId) -> ItemId {
        debug_assert!(
            self.pool.contains(original),
            "apply on unpooled id {original:?}"
        );

        if let Some(entry) = self.memo.iter().find(|entry| entry.original == original) {
            let result = entry.result;
            self.stats.hits += 1;
            if result != original {
                self.pool.add_ref(result, 1);
                self.pool.add_ref(original, 1);
            }
            return result;
        }
        self.stats.misses += 1;

        let mut patched = match self.pool.get(original).as_set() {
            Some(set) => set.clone(),
            None => panic!("apply on non-set item {original:?}"),
        };
        match &self.patch {
            Patch::Attr(id) => {
                let attr = match self.pool.get(*id).as_attr() {
                    Some(attr) => attr.clone(),
                    None => unreachable!("patch id always names an Item::Attr"),
                };
                let kind = attr.kind();
                patched.put(attr.clone());
                debug_assert_eq!(
                    patched.get(kind),
                    Some(&attr),
                    "patched set lost its own delta"
                );
            }
            Patch::Set(set) => patched.merge_from(set),
        }

        // Interning may collapse the patched set onto an existing entry,
        // including the original itself when the delta is a no-op for it.
        let result = self.pool.intern(Item::Set(patched));
        self.pool
            .add_ref(result, if result != original { 2 } else { 1 });
        self.pool.add_ref(original, 1);
        self.memo.push(MemoEntry { original, result });
        log::trace!("memoized patch {original:?} -> {result:?}");
        result
    }

    /// Read access to the borrowed pool, e.g. to resolve returned ids.
    pub fn pool(&self) -> &ItemPool {
        &*self.pool
    }

    /// Number of memoized originals.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Hit/miss counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Drop for PatchCache<'_> {
    fn drop(&mut self) {
        for entry in &self.memo {
            self.pool.release(entry.result);
            self.pool.release(entry.original);
        }
        if let Patch::Attr(id) = &self.patch {
            self.pool.release(*id);
        }
    }
}
