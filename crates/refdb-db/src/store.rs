use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Hash-keyed multi-map holding every primitive of one kind.
///
/// Several entries may share a key (overloads, redeclarations, same-named members of
/// different scopes). Entries under a key keep their insertion order; keys iterate in
/// ascending order so walks over a store are reproducible.
///
/// Serializes as a plain `key -> [entries]` map; the entry count is rebuilt on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimitiveStore<T> {
    entries: BTreeMap<u32, Vec<T>>,
    len: usize,
}

impl<T> Default for PrimitiveStore<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<T> PrimitiveStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `prim` under `key`. Never deduplicates.
    pub fn insert(&mut self, key: u32, prim: T) {
        self.entries.entry(key).or_default().push(prim);
        self.len += 1;
    }

    /// Every entry under `key`, in insertion order.
    pub fn find_all(&self, key: u32) -> &[T] {
        self.entries.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The earliest-inserted entry under `key`.
    pub fn find_first(&self, key: u32) -> Option<&T> {
        self.entries.get(&key).and_then(|prims| prims.first())
    }

    pub fn contains_key(&self, key: u32) -> bool {
        self.entries.contains_key(&key)
    }

    /// `(key, entry)` pairs in ascending key order, insertion order within a key.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.entries
            .iter()
            .flat_map(|(&key, prims)| prims.iter().map(move |prim| (key, prim)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.values().flatten()
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Total number of entries across all keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Approximate heap memory usage of this store in bytes.
    #[must_use]
    pub fn estimated_bytes(&self) -> u64 {
        use std::mem::size_of;

        let mut bytes = 0u64;
        bytes = bytes.saturating_add(
            (self.entries.len() as u64)
                .saturating_mul((size_of::<u32>() + size_of::<Vec<T>>()) as u64),
        );
        for prims in self.entries.values() {
            bytes = bytes
                .saturating_add((prims.capacity() as u64).saturating_mul(size_of::<T>() as u64));
        }
        bytes
    }
}

impl<T: Serialize> Serialize for PrimitiveStore<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PrimitiveStore<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = BTreeMap::<u32, Vec<T>>::deserialize(deserializer)?;
        entries.retain(|_, prims| !prims.is_empty());
        let len = entries.values().map(Vec::len).sum();
        Ok(Self { entries, len })
    }
}

impl<T: Clone> PrimitiveStore<T> {
    /// Append every entry of `other` after the entries already held under the same key.
    ///
    /// Returns the number of entries added.
    pub fn merge_from(&mut self, other: &PrimitiveStore<T>) -> usize {
        for (&key, prims) in &other.entries {
            self.entries
                .entry(key)
                .or_default()
                .extend(prims.iter().cloned());
        }
        self.len += other.len;
        other.len
    }
}

impl<T: Clone + PartialEq> PrimitiveStore<T> {
    /// Like [`PrimitiveStore::merge_from`], but skips entries equal to one already held
    /// under the same key (including ones added earlier in this merge).
    ///
    /// Returns the number of entries added.
    pub fn merge_unique_from(&mut self, other: &PrimitiveStore<T>) -> usize {
        let mut added = 0;
        for (&key, prims) in &other.entries {
            for prim in prims {
                let entry = self.entries.entry(key).or_default();
                if !entry.contains(prim) {
                    entry.push(prim.clone());
                    added += 1;
                }
            }
        }
        self.len += added;
        added
    }
}
