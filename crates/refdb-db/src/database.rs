use refdb_config::DatabaseConfig;
use refdb_names::{hash_name, NameRef, NameTable};

use crate::error::{DatabaseError, Result};
use crate::primitive::{EnumConstant, Field, Function, Primitive, PrimitiveKind, Type};
use crate::record::{Record, Stores};
use crate::store::PrimitiveStore;

/// Scalar types registered by [`Database::add_base_type_primitives`], in insertion order.
pub const BASE_TYPE_NAMES: &[&str] = &[
    "void",
    "bool",
    "char",
    "signed char",
    "unsigned char",
    "wchar_t",
    "char16_t",
    "char32_t",
    "short",
    "unsigned short",
    "int",
    "unsigned int",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "float",
    "double",
    "long double",
];

/// Reflected program metadata: a name table plus one store per primitive kind.
///
/// A database is filled by one producer and then read. To ingest in parallel, build one
/// database per unit of work and [`merge`](Database::merge) them on a single thread.
#[derive(Clone, Debug, Default)]
pub struct Database {
    names: NameTable,
    stores: Stores,
    extra_base_types: Vec<String>,
}

/// Entry counts, as reported by [`Database::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub namespaces: usize,
    pub types: usize,
    pub classes: usize,
    pub enums: usize,
    pub enum_constants: usize,
    pub functions: usize,
    pub fields: usize,
    pub unnamed_fields: usize,
    pub names: usize,
}

impl DatabaseStats {
    pub fn total_primitives(&self) -> usize {
        self.namespaces
            + self.types
            + self.classes
            + self.enums
            + self.enum_constants
            + self.functions
            + self.fields
            + self.unnamed_fields
    }
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &DatabaseConfig) -> Self {
        Self {
            names: NameTable::with_policy(config.collision_policy),
            stores: Stores::default(),
            extra_base_types: config.extra_base_types.clone(),
        }
    }

    /// Register the built-in scalar types (and any configured extras) at global scope.
    ///
    /// Meant to be called once on a fresh database. A second call adds a second copy of
    /// every entry.
    pub fn add_base_type_primitives(&mut self) {
        let names: Vec<String> = BASE_TYPE_NAMES
            .iter()
            .map(|name| (*name).to_owned())
            .chain(self.extra_base_types.iter().cloned())
            .collect();

        for text in &names {
            let name = self.names.intern(text);
            self.add_primitive(Type::new(name, NameRef::GLOBAL));
        }

        tracing::debug!(
            target: "refdb.db",
            count = names.len(),
            "registered base type primitives"
        );
    }

    /// Store `prim`.
    ///
    /// # Panics
    ///
    /// If `prim` is anonymous and its kind has no parent-keyed store, or if its header
    /// carries another kind's tag. See [`Database::try_add_primitive`].
    pub fn add_primitive<T: Record>(&mut self, prim: T) {
        if let Err(err) = self.try_add_primitive(prim) {
            panic!("invalid primitive: {err}");
        }
    }

    /// Store `prim`, keyed by its name, or by its parent if it is anonymous (or a
    /// function parameter).
    pub fn try_add_primitive<T: Record>(&mut self, prim: T) -> Result<()> {
        let found = prim.header().kind();
        if found != T::KIND {
            return Err(DatabaseError::KindMismatch {
                expected: T::KIND,
                found,
            });
        }

        if prim.indexed_by_parent() {
            let key = prim.parent().hash_value();
            let store = T::unnamed_store_mut(&mut self.stores)
                .ok_or(DatabaseError::UnnamedNotSupported { kind: T::KIND })?;
            store.insert(key, prim);
        } else {
            let key = prim.name().hash_value();
            T::named_store_mut(&mut self.stores).insert(key, prim);
        }
        Ok(())
    }

    /// Store a primitive of any kind.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`Database::add_primitive`].
    pub fn add(&mut self, prim: Primitive) {
        match prim {
            Primitive::Namespace(p) => self.add_primitive(p),
            Primitive::Type(p) => self.add_primitive(p),
            Primitive::Class(p) => self.add_primitive(p),
            Primitive::Enum(p) => self.add_primitive(p),
            Primitive::EnumConstant(p) => self.add_primitive(p),
            Primitive::Function(p) => self.add_primitive(p),
            Primitive::Field(p) => self.add_primitive(p),
        }
    }

    /// First-inserted named `T` called `text`.
    ///
    /// Only hashes `text`; the name table is left untouched.
    pub fn get_first_primitive<T: Record>(&self, text: &str) -> Option<&T> {
        if text.is_empty() {
            return None;
        }
        T::named_store(&self.stores).find_first(hash_name(text))
    }

    /// Every named `T` called `text`, in insertion order.
    pub fn find_all<T: Record>(&self, text: &str) -> &[T] {
        if text.is_empty() {
            return &[];
        }
        T::named_store(&self.stores).find_all(hash_name(text))
    }

    pub fn find_all_by_name<T: Record>(&self, name: NameRef) -> &[T] {
        T::named_store(&self.stores).find_all(name.hash_value())
    }

    pub fn store<T: Record>(&self) -> &PrimitiveStore<T> {
        T::named_store(&self.stores)
    }

    /// Parent-keyed store for anonymous `T`s.
    ///
    /// # Panics
    ///
    /// If `T` has no such store (every kind except [`Field`]).
    pub fn unnamed_store<T: Record>(&self) -> &PrimitiveStore<T> {
        match T::unnamed_store(&self.stores) {
            Some(store) => store,
            None => panic!("{}", DatabaseError::UnnamedNotSupported { kind: T::KIND }),
        }
    }

    pub fn unnamed_fields(&self) -> &PrimitiveStore<Field> {
        self.stores.unnamed_fields()
    }

    /// Anonymous fields and parameters whose parent is `parent`.
    pub fn unnamed_fields_of(&self, parent: NameRef) -> &[Field] {
        self.stores.unnamed_fields().find_all(parent.hash_value())
    }

    /// Named `T`s in store order.
    pub fn primitives<T: Record>(&self) -> impl Iterator<Item = &T> + '_ {
        T::named_store(&self.stores).values()
    }

    /// Non-parameter fields declared in `parent`: named ones first, then anonymous ones.
    pub fn fields_of(&self, parent: NameRef) -> Vec<&Field> {
        self.primitives::<Field>()
            .filter(|field| field.header.parent == parent)
            .chain(
                self.unnamed_fields_of(parent)
                    .iter()
                    .filter(|field| !field.is_parameter()),
            )
            .collect()
    }

    /// Parameters of `function`, ordered by position.
    pub fn parameters_of(&self, function: &Function) -> Vec<&Field> {
        let mut params: Vec<&Field> = self
            .unnamed_fields_of(function.header.name)
            .iter()
            .filter(|field| field.owning_function_id == function.unique_id)
            .collect();
        params.sort_by_key(|field| field.offset);
        params
    }

    /// Constants of the enum called `enum_name`, in store order.
    pub fn constants_of(&self, enum_name: NameRef) -> Vec<&EnumConstant> {
        self.primitives::<EnumConstant>()
            .filter(|constant| constant.header.parent == enum_name)
            .collect()
    }

    /// Append every entry of `other` to this database.
    ///
    /// Entries already present here stay ahead of `other`'s under a shared key; nothing is
    /// deduplicated. Names from `other` are copied so merged entries stay resolvable.
    pub fn merge(&mut self, other: &Database) {
        self.names.merge_from(&other.names);
        let added = self.stores.merge_from(&other.stores);
        tracing::debug!(
            target: "refdb.db",
            added,
            total = self.stores.total_len(),
            names = self.names.len(),
            "merged database"
        );
    }

    /// Like [`Database::merge`], but skips entries equal to one already stored under the
    /// same key.
    pub fn merge_unique(&mut self, other: &Database) {
        self.names.merge_from(&other.names);
        let added = self.stores.merge_unique_from(&other.stores);
        tracing::debug!(
            target: "refdb.db",
            added,
            skipped = other.stores.total_len().saturating_sub(added),
            total = self.stores.total_len(),
            "merged database without duplicates"
        );
    }

    #[inline]
    pub const fn no_name(&self) -> NameRef {
        NameRef::NONE
    }

    /// Intern `text`.
    pub fn name(&mut self, text: &str) -> NameRef {
        self.names.intern(text)
    }

    /// Handle for `text` if it is already interned.
    pub fn lookup_name(&self, text: &str) -> Option<NameRef> {
        self.names.lookup(text)
    }

    pub fn name_for_hash(&self, hash: u32) -> Option<NameRef> {
        self.names.name_for_hash(hash)
    }

    pub fn name_text(&self, name: NameRef) -> Option<&str> {
        self.names.text(name)
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            namespaces: self.stores.len_of(PrimitiveKind::Namespace),
            types: self.stores.len_of(PrimitiveKind::Type),
            classes: self.stores.len_of(PrimitiveKind::Class),
            enums: self.stores.len_of(PrimitiveKind::Enum),
            enum_constants: self.stores.len_of(PrimitiveKind::EnumConstant),
            functions: self.stores.len_of(PrimitiveKind::Function),
            fields: self.stores.len_of(PrimitiveKind::Field),
            unnamed_fields: self.stores.unnamed_fields().len(),
            names: self.names.len(),
        }
    }

    /// Approximate heap memory usage of this database in bytes.
    #[must_use]
    pub fn estimated_bytes(&self) -> u64 {
        let mut bytes = 0u64;
        bytes = bytes.saturating_add(self.names.estimated_bytes());
        bytes = bytes.saturating_add(self.stores.estimated_bytes());
        for text in &self.extra_base_types {
            bytes = bytes.saturating_add(text.capacity() as u64);
        }
        bytes
    }
}
