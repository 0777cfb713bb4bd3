use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::hash::{hash_name, mix_hashes};

/// Handle to an interned name.
///
/// Two handles are equal iff their hashes are equal. [`NameRef::NONE`] is reserved for
/// primitives without a declared name; it doubles as the global scope handle.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NameRef(u32);

impl NameRef {
    pub const NONE: NameRef = NameRef(0);

    /// Parent of every top-level primitive.
    pub const GLOBAL: NameRef = NameRef::NONE;

    /// Wrap a raw hash. The hash is not checked against any table.
    #[inline]
    pub const fn from_hash(hash: u32) -> Self {
        Self(hash)
    }

    #[inline]
    pub const fn hash_value(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// Order-sensitive mix of `self` followed by `other`.
    #[inline]
    #[must_use]
    pub fn combine(self, other: NameRef) -> u32 {
        mix_hashes(self.0, other.0)
    }
}

impl fmt::Debug for NameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("NameRef(<none>)")
        } else {
            write!(f, "NameRef({:#010x})", self.0)
        }
    }
}

/// What the table does when two distinct strings produce the same hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The later string silently aliases the earlier one.
    #[default]
    Ignore,
    /// Aliasing still happens, but each collision is recorded and logged.
    Warn,
}

/// Two distinct strings that were interned under the same hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameCollision {
    pub hash: u32,
    pub existing: String,
    pub incoming: String,
}

/// Interned strings keyed by hash.
///
/// Owned by exactly one database; there is no shared or global table.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    names: BTreeMap<u32, String>,
    policy: CollisionPolicy,
    collisions: Vec<NameCollision>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    #[inline]
    pub const fn no_name() -> NameRef {
        NameRef::NONE
    }

    /// Intern `text` and return its handle.
    ///
    /// The first text stored under a hash is kept; re-interning never overwrites it. The
    /// empty string is the no-name sentinel and is not stored.
    pub fn intern(&mut self, text: &str) -> NameRef {
        if text.is_empty() {
            return NameRef::NONE;
        }

        let hash = hash_name(text);
        if hash == NameRef::NONE.0 {
            // Aliases the sentinel; storing it would give "no name" a text.
            self.report_collision(hash, "", text);
            return NameRef::NONE;
        }

        match self.names.get(&hash) {
            Some(existing) => {
                if self.policy == CollisionPolicy::Warn && existing != text {
                    let existing = existing.clone();
                    self.report_collision(hash, &existing, text);
                }
            }
            None => {
                self.names.insert(hash, text.to_owned());
            }
        }

        NameRef(hash)
    }

    /// Handle for `text` if it has already been interned. Never mutates the table.
    pub fn lookup(&self, text: &str) -> Option<NameRef> {
        if text.is_empty() {
            return Some(NameRef::NONE);
        }
        let hash = hash_name(text);
        self.names.contains_key(&hash).then_some(NameRef(hash))
    }

    pub fn resolve(&self, hash: u32) -> Option<&str> {
        self.names.get(&hash).map(String::as_str)
    }

    pub fn text(&self, name: NameRef) -> Option<&str> {
        self.resolve(name.0)
    }

    /// Handle for a raw hash, if a string with that hash has been interned.
    pub fn name_for_hash(&self, hash: u32) -> Option<NameRef> {
        if hash == NameRef::NONE.0 {
            return Some(NameRef::NONE);
        }
        self.names.contains_key(&hash).then_some(NameRef(hash))
    }

    /// Copy every name from `other` that `self` does not already hold.
    pub fn merge_from(&mut self, other: &NameTable) {
        for (&hash, text) in &other.names {
            match self.names.get(&hash) {
                Some(existing) => {
                    if self.policy == CollisionPolicy::Warn && existing != text {
                        let existing = existing.clone();
                        self.report_collision(hash, &existing, text);
                    }
                }
                None => {
                    self.names.insert(hash, text.clone());
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Interned names in ascending hash order.
    pub fn iter(&self) -> impl Iterator<Item = (NameRef, &str)> + '_ {
        self.names
            .iter()
            .map(|(&hash, text)| (NameRef(hash), text.as_str()))
    }

    /// Collisions observed so far. Always empty under [`CollisionPolicy::Ignore`].
    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Approximate heap memory usage of this table in bytes.
    #[must_use]
    pub fn estimated_bytes(&self) -> u64 {
        use std::mem::size_of;

        let mut bytes = 0u64;
        bytes = bytes.saturating_add(
            (self.names.len() as u64)
                .saturating_mul((size_of::<u32>() + size_of::<String>()) as u64),
        );
        for text in self.names.values() {
            bytes = bytes.saturating_add(text.capacity() as u64);
        }
        for collision in &self.collisions {
            bytes = bytes.saturating_add(size_of::<NameCollision>() as u64);
            bytes = bytes.saturating_add(collision.existing.capacity() as u64);
            bytes = bytes.saturating_add(collision.incoming.capacity() as u64);
        }
        bytes
    }

    fn report_collision(&mut self, hash: u32, existing: &str, incoming: &str) {
        if self.policy == CollisionPolicy::Ignore {
            return;
        }
        tracing::warn!(
            target: "refdb.names",
            hash,
            existing,
            incoming,
            "name hash collision; later name aliases the earlier one"
        );
        self.collisions.push(NameCollision {
            hash,
            existing: existing.to_owned(),
            incoming: incoming.to_owned(),
        });
    }
}
