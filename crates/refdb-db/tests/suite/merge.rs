use pretty_assertions::assert_eq;
use refdb_db::{
    Class, CollisionPolicy, Database, DatabaseConfig, Enum, EnumConstant, Field, Function,
    Modifier, NameRef, Namespace, Type,
};

fn unit(class_size: u32, function_id: u32) -> Database {
    let mut db = Database::new();
    let ns = db.name("ns");
    let foo = db.name("Foo");
    let f = db.name("f");
    let int = db.name("int");

    db.add_primitive(Namespace::new(ns, NameRef::GLOBAL));
    db.add_primitive(Class::new(foo, ns, NameRef::NONE, class_size));
    let function = Function::new(f, foo, function_id);
    db.add_primitive(function);
    db.add_primitive(Field::parameter(NameRef::NONE, &function, int, Modifier::Value, false, 0));
    db
}

#[test]
fn merge_concatenates_per_key() {
    let mut a = unit(8, 1);
    let b = unit(16, 2);

    a.merge(&b);

    let sizes: Vec<u32> = a.find_all::<Class>("Foo").iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![8, 16]);

    let ids: Vec<u32> = a.find_all::<Function>("f").iter().map(|f| f.unique_id).collect();
    assert_eq!(ids, vec![1, 2]);

    assert_eq!(a.find_all::<Namespace>("ns").len(), 2);

    let f = a.lookup_name("f").unwrap();
    let owners: Vec<u32> = a
        .unnamed_fields_of(f)
        .iter()
        .map(|p| p.owning_function_id)
        .collect();
    assert_eq!(owners, vec![1, 2]);
}

#[test]
fn merge_leaves_the_source_untouched() {
    let mut a = unit(8, 1);
    let b = unit(16, 2);
    let before = b.stats();

    a.merge(&b);

    assert_eq!(b.stats(), before);
    assert_eq!(a.stats().total_primitives(), 2 * before.total_primitives());
}

#[test]
fn merge_keeps_exact_duplicates() {
    let mut a = unit(8, 1);
    let b = unit(8, 1);

    a.merge(&b);

    assert_eq!(a.find_all::<Class>("Foo").len(), 2);
    assert_eq!(a.find_all::<Class>("Foo")[0], a.find_all::<Class>("Foo")[1]);
}

#[test]
fn merge_brings_names_along() {
    let mut a = Database::new();
    let mut b = Database::new();
    let color = b.name("Color");
    let red = b.name("Red");
    b.add_primitive(Enum::new(color, NameRef::GLOBAL));
    b.add_primitive(EnumConstant::new(red, color, 1));

    a.merge(&b);

    let constant = a.get_first_primitive::<EnumConstant>("Red").unwrap();
    assert_eq!(a.name_text(constant.header.parent), Some("Color"));
    assert_eq!(a.name_text(constant.header.name), Some("Red"));
}

#[test]
fn sequential_merges_preserve_unit_order() {
    let mut aggregate = Database::new();
    for id in 1..=4 {
        aggregate.merge(&unit(8, id));
    }

    let ids: Vec<u32> = aggregate
        .find_all::<Function>("f")
        .iter()
        .map(|f| f.unique_id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn merge_unique_drops_structural_duplicates_only() {
    let mut a = unit(8, 1);
    let b = unit(8, 1);
    let c = unit(16, 2);

    a.merge_unique(&b);
    assert_eq!(a.stats(), unit(8, 1).stats());

    a.merge_unique(&c);
    let sizes: Vec<u32> = a.find_all::<Class>("Foo").iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![8, 16]);
    // The namespace is identical in every unit.
    assert_eq!(a.find_all::<Namespace>("ns").len(), 1);
}

#[test]
fn per_worker_databases_merge_across_threads() {
    let handles: Vec<_> = (1..=3)
        .map(|id| std::thread::spawn(move || unit(8 * id, id)))
        .collect();
    let units: Vec<Database> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let mut aggregate = Database::new();
    aggregate.add_base_type_primitives();
    for unit in &units {
        aggregate.merge(unit);
    }

    assert!(aggregate.get_first_primitive::<Type>("int").is_some());
    assert_eq!(aggregate.find_all::<Class>("Foo").len(), 3);
}

#[test]
fn merge_under_warn_policy_keeps_distinct_names_clean() {
    let config = DatabaseConfig {
        collision_policy: CollisionPolicy::Warn,
        ..DatabaseConfig::default()
    };
    let mut a = Database::with_config(&config);
    a.name("Foo");
    let b = unit(8, 1);

    a.merge(&b);

    assert!(a.names().collisions().is_empty());
    assert_eq!(a.names().policy(), CollisionPolicy::Warn);
}

fn members(offset: i32, alias: &str) -> Database {
    let mut db = Database::new();
    let foo = db.name("Foo");
    let x = db.name("x");
    let int = db.name("int");
    let alias = db.name(alias);

    db.add_primitive(Type::new(int, NameRef::GLOBAL));
    db.add_primitive(Type::new(alias, NameRef::GLOBAL));
    db.add_primitive(Field::new(x, foo, int, Modifier::Value, false, offset));
    db
}

#[test]
fn merge_orders_named_fields_and_types_by_source() {
    let mut a = members(0, "size_t");
    let b = members(4, "ssize_t");

    a.merge(&b);

    let offsets: Vec<i32> = a.find_all::<Field>("x").iter().map(|f| f.offset).collect();
    assert_eq!(offsets, vec![0, 4]);
    assert_eq!(a.find_all::<Type>("int").len(), 2);
    assert_eq!(a.find_all::<Type>("size_t").len(), 1);
    assert_eq!(a.find_all::<Type>("ssize_t").len(), 1);

    let types: Vec<&str> = a
        .primitives::<Type>()
        .filter_map(|ty| a.name_text(ty.header.name))
        .collect();
    assert_eq!(types.len(), 4);
    assert_eq!(a.stats().fields, 2);
    assert_eq!(a.stats().types, 4);
}

#[test]
fn merge_unique_covers_named_fields_and_types() {
    let mut a = members(0, "size_t");

    a.merge_unique(&members(0, "size_t"));
    assert_eq!(a.stats(), members(0, "size_t").stats());

    a.merge_unique(&members(4, "ssize_t"));
    let offsets: Vec<i32> = a.find_all::<Field>("x").iter().map(|f| f.offset).collect();
    assert_eq!(offsets, vec![0, 4]);
    assert_eq!(a.find_all::<Type>("int").len(), 1);
    assert_eq!(a.find_all::<Type>("ssize_t").len(), 1);
    assert_eq!(a.stats().types, 3);
}
