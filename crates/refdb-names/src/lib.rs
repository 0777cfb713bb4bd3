//! Name interning for refdb.
//!
//! Every reflected primitive refers to its own name, its parent scope and any referenced
//! types through [`NameRef`] handles. A handle is the 32-bit hash of the interned text, so
//! equality is a single integer compare and two independently built [`NameTable`]s agree on
//! the handle for the same string without coordinating.
//!
//! Distinct strings that hash to the same value share one handle. Whether that is reported
//! is controlled by [`CollisionPolicy`]; it never changes what gets stored.

mod hash;
mod table;

pub use hash::{hash_name, mix_hashes};
pub use table::{CollisionPolicy, NameCollision, NameRef, NameTable};
