use pretty_assertions::assert_eq;
use refdb_names::{hash_name, mix_hashes, NameRef, NameTable};

#[test]
fn resolve_returns_the_interned_text() {
    let mut table = NameTable::new();
    let names = ["int", "unsigned long long", "ns::Outer::Inner", "operator=="];
    let refs: Vec<NameRef> = names.iter().map(|name| table.intern(name)).collect();

    for (name, name_ref) in names.iter().zip(&refs) {
        assert_eq!(table.resolve(name_ref.hash_value()), Some(*name));
        assert_eq!(table.text(*name_ref), Some(*name));
    }
    assert_eq!(table.len(), names.len());
}

#[test]
fn interned_ref_hash_matches_hash_name() {
    let mut table = NameTable::new();
    let foo = table.intern("Foo");
    assert_eq!(foo.hash_value(), hash_name("Foo"));
    assert_eq!(table.name_for_hash(hash_name("Foo")), Some(foo));
    assert_eq!(table.name_for_hash(hash_name("Bar")), None);
}

#[test]
fn resolve_misses_for_unknown_hash() {
    let table = NameTable::new();
    assert_eq!(table.resolve(hash_name("never-interned")), None);
    assert_eq!(table.text(NameRef::NONE), None);
}

#[test]
fn combine_matches_mix_hashes() {
    let mut table = NameTable::new();
    let scope = table.intern("ns");
    let name = table.intern("Foo");

    assert_eq!(
        scope.combine(name),
        mix_hashes(scope.hash_value(), name.hash_value())
    );
    assert_ne!(scope.combine(name), name.combine(scope));
}

#[test]
fn independent_tables_agree_on_handles() {
    let mut a = NameTable::new();
    let mut b = NameTable::new();
    b.intern("unrelated");

    assert_eq!(a.intern("Foo"), b.intern("Foo"));
}

#[test]
fn iteration_is_in_hash_order() {
    let mut table = NameTable::new();
    for name in ["c", "a", "b", "d"] {
        table.intern(name);
    }
    let hashes: Vec<u32> = table.iter().map(|(name, _)| name.hash_value()).collect();
    let mut sorted = hashes.clone();
    sorted.sort_unstable();
    assert_eq!(hashes, sorted);
}
