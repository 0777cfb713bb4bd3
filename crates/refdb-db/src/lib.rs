//! Storage and indexing for reflected program metadata.
//!
//! An external ingester walks parsed source and feeds [`Database::add_primitive`] with
//! namespaces, types, classes, enums, enum constants, functions and fields. Consumers then
//! query the database by kind and name:
//!
//! - every kind has a named [`PrimitiveStore`] keyed by the hash of the primitive's name,
//!   holding overloads and redeclarations side by side in insertion order;
//! - anonymous fields and function parameters live in a second store keyed by their parent
//!   scope;
//! - [`Database::merge`] folds independently built databases into one.

mod database;
mod error;
mod primitive;
mod record;
mod store;

pub use database::{Database, DatabaseStats, BASE_TYPE_NAMES};
pub use error::{DatabaseError, Result};
pub use primitive::{
    Class, Enum, EnumConstant, Field, Function, Header, Modifier, Namespace, Primitive,
    PrimitiveKind, Type,
};
pub use record::{Record, Stores};
pub use store::PrimitiveStore;

pub use refdb_config::DatabaseConfig;
pub use refdb_names::{CollisionPolicy, NameRef, NameTable};
