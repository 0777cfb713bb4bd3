//! Static kind-to-store dispatch.
//!
//! Each primitive shape knows which of the [`Stores`] it lives in. The choice is made at
//! compile time through the [`Record`] implementation; nothing inspects types at runtime.

use refdb_names::NameRef;

use crate::primitive::{
    Class, Enum, EnumConstant, Field, Function, Header, Namespace, Primitive, PrimitiveKind, Type,
};
use crate::store::PrimitiveStore;

/// One named store per kind plus the parent-keyed store for anonymous fields.
#[derive(Clone, Debug, Default)]
pub struct Stores {
    namespaces: PrimitiveStore<Namespace>,
    types: PrimitiveStore<Type>,
    classes: PrimitiveStore<Class>,
    enums: PrimitiveStore<Enum>,
    enum_constants: PrimitiveStore<EnumConstant>,
    functions: PrimitiveStore<Function>,
    fields: PrimitiveStore<Field>,
    unnamed_fields: PrimitiveStore<Field>,
}

impl Stores {
    /// Number of named entries of `kind`.
    pub fn len_of(&self, kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Namespace => self.namespaces.len(),
            PrimitiveKind::Type => self.types.len(),
            PrimitiveKind::Class => self.classes.len(),
            PrimitiveKind::Enum => self.enums.len(),
            PrimitiveKind::EnumConstant => self.enum_constants.len(),
            PrimitiveKind::Function => self.functions.len(),
            PrimitiveKind::Field => self.fields.len(),
        }
    }

    pub fn unnamed_fields(&self) -> &PrimitiveStore<Field> {
        &self.unnamed_fields
    }

    /// Returns the number of entries added.
    pub(crate) fn merge_from(&mut self, other: &Stores) -> usize {
        self.namespaces.merge_from(&other.namespaces)
            + self.types.merge_from(&other.types)
            + self.classes.merge_from(&other.classes)
            + self.enums.merge_from(&other.enums)
            + self.enum_constants.merge_from(&other.enum_constants)
            + self.functions.merge_from(&other.functions)
            + self.fields.merge_from(&other.fields)
            + self.unnamed_fields.merge_from(&other.unnamed_fields)
    }

    /// Returns the number of entries added.
    pub(crate) fn merge_unique_from(&mut self, other: &Stores) -> usize {
        self.namespaces.merge_unique_from(&other.namespaces)
            + self.types.merge_unique_from(&other.types)
            + self.classes.merge_unique_from(&other.classes)
            + self.enums.merge_unique_from(&other.enums)
            + self.enum_constants.merge_unique_from(&other.enum_constants)
            + self.functions.merge_unique_from(&other.functions)
            + self.fields.merge_unique_from(&other.fields)
            + self.unnamed_fields.merge_unique_from(&other.unnamed_fields)
    }

    pub(crate) fn total_len(&self) -> usize {
        PrimitiveKind::ALL
            .iter()
            .map(|&kind| self.len_of(kind))
            .sum::<usize>()
            + self.unnamed_fields.len()
    }

    pub(crate) fn estimated_bytes(&self) -> u64 {
        let mut bytes = 0u64;
        bytes = bytes.saturating_add(self.namespaces.estimated_bytes());
        bytes = bytes.saturating_add(self.types.estimated_bytes());
        bytes = bytes.saturating_add(self.classes.estimated_bytes());
        bytes = bytes.saturating_add(self.enums.estimated_bytes());
        bytes = bytes.saturating_add(self.enum_constants.estimated_bytes());
        bytes = bytes.saturating_add(self.functions.estimated_bytes());
        bytes = bytes.saturating_add(self.fields.estimated_bytes());
        bytes = bytes.saturating_add(self.unnamed_fields.estimated_bytes());
        bytes
    }
}

/// A concrete primitive shape and the stores it is kept in.
pub trait Record: Clone + PartialEq + Into<Primitive> + 'static {
    const KIND: PrimitiveKind;

    fn header(&self) -> &Header;

    fn name(&self) -> NameRef {
        self.header().name
    }

    fn parent(&self) -> NameRef {
        self.header().parent
    }

    /// Whether this entry is keyed by its parent scope instead of its own name.
    fn indexed_by_parent(&self) -> bool {
        self.name().is_none()
    }

    fn named_store(stores: &Stores) -> &PrimitiveStore<Self>;

    fn named_store_mut(stores: &mut Stores) -> &mut PrimitiveStore<Self>;

    /// `None` for kinds that cannot be anonymous.
    fn unnamed_store(_stores: &Stores) -> Option<&PrimitiveStore<Self>> {
        None
    }

    fn unnamed_store_mut(_stores: &mut Stores) -> Option<&mut PrimitiveStore<Self>> {
        None
    }
}

macro_rules! impl_named_record {
    ($($shape:ident => $store:ident),* $(,)?) => {
        $(
            impl Record for $shape {
                const KIND: PrimitiveKind = PrimitiveKind::$shape;

                fn header(&self) -> &Header {
                    &self.header
                }

                fn named_store(stores: &Stores) -> &PrimitiveStore<Self> {
                    &stores.$store
                }

                fn named_store_mut(stores: &mut Stores) -> &mut PrimitiveStore<Self> {
                    &mut stores.$store
                }
            }
        )*
    };
}

impl_named_record!(
    Namespace => namespaces,
    Type => types,
    Class => classes,
    Enum => enums,
    EnumConstant => enum_constants,
    Function => functions,
);

impl Record for Field {
    const KIND: PrimitiveKind = PrimitiveKind::Field;

    fn header(&self) -> &Header {
        &self.header
    }

    // Parameters are always looked up through their function, never by name.
    fn indexed_by_parent(&self) -> bool {
        self.header.name.is_none() || self.is_parameter()
    }

    fn named_store(stores: &Stores) -> &PrimitiveStore<Self> {
        &stores.fields
    }

    fn named_store_mut(stores: &mut Stores) -> &mut PrimitiveStore<Self> {
        &mut stores.fields
    }

    fn unnamed_store(stores: &Stores) -> Option<&PrimitiveStore<Self>> {
        Some(&stores.unnamed_fields)
    }

    fn unnamed_store_mut(stores: &mut Stores) -> Option<&mut PrimitiveStore<Self>> {
        Some(&mut stores.unnamed_fields)
    }
}
