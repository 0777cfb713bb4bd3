use xxhash_rust::xxh32::xxh32;

const NAME_SEED: u32 = 0;

/// Hash the full UTF-8 bytes of `text` into a 32-bit value.
///
/// The hash is xxHash32 with a fixed seed: stable across platforms, runs and databases.
/// No normalisation is applied (`"Foo"`, `"foo"` and `" Foo"` are all different names).
///
/// The empty string hashes to `0`, the value of the no-name handle, so hashing and
/// interning agree on it.
#[inline]
#[must_use]
pub fn hash_name(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    xxh32(text.as_bytes(), NAME_SEED)
}

/// Mix two hashes into one, order-sensitively.
///
/// Used to derive a stable identifier from two existing ones (for example a scope and a
/// qualifier) without rebuilding and rehashing the concatenated string.
#[inline]
#[must_use]
pub fn mix_hashes(a: u32, b: u32) -> u32 {
    xxh32(&b.to_le_bytes(), a)
}
