use refdb_names::NameRef;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Namespace,
    Type,
    Class,
    Enum,
    EnumConstant,
    Function,
    Field,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Namespace,
        PrimitiveKind::Type,
        PrimitiveKind::Class,
        PrimitiveKind::Enum,
        PrimitiveKind::EnumConstant,
        PrimitiveKind::Function,
        PrimitiveKind::Field,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Namespace => "namespace",
            PrimitiveKind::Type => "type",
            PrimitiveKind::Class => "class",
            PrimitiveKind::Enum => "enum",
            PrimitiveKind::EnumConstant => "enum_constant",
            PrimitiveKind::Function => "function",
            PrimitiveKind::Field => "field",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every primitive.
///
/// Only the shape constructors build headers, so the kind tag always matches the shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    kind: PrimitiveKind,
    /// [`NameRef::NONE`] for anonymous primitives.
    pub name: NameRef,
    /// Enclosing namespace, class or function; [`NameRef::GLOBAL`] at top level.
    pub parent: NameRef,
}

impl Header {
    pub(crate) const fn new(kind: PrimitiveKind, name: NameRef, parent: NameRef) -> Self {
        Self { kind, name, parent }
    }

    pub const fn kind(&self) -> PrimitiveKind {
        self.kind
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    pub header: Header,
}

impl Namespace {
    pub const fn new(name: NameRef, parent: NameRef) -> Self {
        Self {
            header: Header::new(PrimitiveKind::Namespace, name, parent),
        }
    }
}

/// A built-in or otherwise opaque type. Classes and enums are types too, but are stored
/// under their own kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    pub header: Header,
}

impl Type {
    pub const fn new(name: NameRef, parent: NameRef) -> Self {
        Self {
            header: Header::new(PrimitiveKind::Type, name, parent),
        }
    }
}

/// A struct or class. Only single inheritance is modeled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Class {
    pub header: Header,
    /// [`NameRef::NONE`] when the class has no base.
    pub base_class: NameRef,
    /// Total size in bytes, including alignment padding.
    pub size: u32,
}

impl Class {
    pub const fn new(name: NameRef, parent: NameRef, base_class: NameRef, size: u32) -> Self {
        Self {
            header: Header::new(PrimitiveKind::Class, name, parent),
            base_class,
            size,
        }
    }

    pub const fn has_base_class(&self) -> bool {
        !self.base_class.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enum {
    pub header: Header,
}

impl Enum {
    pub const fn new(name: NameRef, parent: NameRef) -> Self {
        Self {
            header: Header::new(PrimitiveKind::Enum, name, parent),
        }
    }
}

/// A name/value pair belonging to an [`Enum`].
///
/// Values are held as `i64`; enumerations whose underlying type does not fit a signed
/// 64-bit integer are not represented faithfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumConstant {
    pub header: Header,
    pub value: i64,
}

impl EnumConstant {
    pub const fn new(name: NameRef, parent: NameRef, value: i64) -> Self {
        Self {
            header: Header::new(PrimitiveKind::EnumConstant, name, parent),
            value,
        }
    }
}

/// A free function or method.
///
/// Overloads share name and parent; `unique_id` tells them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Function {
    pub header: Header,
    pub unique_id: u32,
}

impl Function {
    pub const fn new(name: NameRef, parent: NameRef, unique_id: u32) -> Self {
        Self {
            header: Header::new(PrimitiveKind::Function, name, parent),
            unique_id,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    #[default]
    Value,
    Pointer,
    Reference,
}

/// A class data member or a function parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub header: Header,
    pub ty: NameRef,
    pub modifier: Modifier,
    pub is_const: bool,
    /// Byte offset within the owning class, or parameter index within the owning function.
    /// `-1` when unknown.
    pub offset: i32,
    /// `unique_id` of the owning [`Function`]; `0` for class members.
    pub owning_function_id: u32,
}

impl Field {
    pub const UNKNOWN_OFFSET: i32 = -1;

    pub const fn new(
        name: NameRef,
        parent: NameRef,
        ty: NameRef,
        modifier: Modifier,
        is_const: bool,
        offset: i32,
    ) -> Self {
        Self {
            header: Header::new(PrimitiveKind::Field, name, parent),
            ty,
            modifier,
            is_const,
            offset,
            owning_function_id: 0,
        }
    }

    /// A parameter of `function`, at position `index`.
    pub const fn parameter(
        name: NameRef,
        function: &Function,
        ty: NameRef,
        modifier: Modifier,
        is_const: bool,
        index: i32,
    ) -> Self {
        Self {
            header: Header::new(PrimitiveKind::Field, name, function.header.name),
            ty,
            modifier,
            is_const,
            offset: index,
            owning_function_id: function.unique_id,
        }
    }

    pub const fn is_parameter(&self) -> bool {
        self.owning_function_id != 0
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(
            NameRef::NONE,
            NameRef::GLOBAL,
            NameRef::NONE,
            Modifier::Value,
            false,
            Self::UNKNOWN_OFFSET,
        )
    }
}

/// Any reflected primitive, tagged by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Namespace(Namespace),
    Type(Type),
    Class(Class),
    Enum(Enum),
    EnumConstant(EnumConstant),
    Function(Function),
    Field(Field),
}

impl Primitive {
    pub const fn header(&self) -> &Header {
        match self {
            Primitive::Namespace(p) => &p.header,
            Primitive::Type(p) => &p.header,
            Primitive::Class(p) => &p.header,
            Primitive::Enum(p) => &p.header,
            Primitive::EnumConstant(p) => &p.header,
            Primitive::Function(p) => &p.header,
            Primitive::Field(p) => &p.header,
        }
    }

    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Namespace(_) => PrimitiveKind::Namespace,
            Primitive::Type(_) => PrimitiveKind::Type,
            Primitive::Class(_) => PrimitiveKind::Class,
            Primitive::Enum(_) => PrimitiveKind::Enum,
            Primitive::EnumConstant(_) => PrimitiveKind::EnumConstant,
            Primitive::Function(_) => PrimitiveKind::Function,
            Primitive::Field(_) => PrimitiveKind::Field,
        }
    }

    pub const fn name(&self) -> NameRef {
        self.header().name
    }

    pub const fn parent(&self) -> NameRef {
        self.header().parent
    }
}

macro_rules! impl_from_shape {
    ($($shape:ident),* $(,)?) => {
        $(
            impl From<$shape> for Primitive {
                fn from(prim: $shape) -> Self {
                    Primitive::$shape(prim)
                }
            }
        )*
    };
}

impl_from_shape!(Namespace, Type, Class, Enum, EnumConstant, Function, Field);
