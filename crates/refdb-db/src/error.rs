use crate::primitive::PrimitiveKind;

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Misuse of the database API by the ingester.
///
/// These never occur when primitives are built the way the ingestion contract describes;
/// the panicking entry points treat them as bugs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    #[error("no unnamed primitive store for {kind} primitives")]
    UnnamedNotSupported { kind: PrimitiveKind },
    #[error("{expected} primitive carries a {found} header")]
    KindMismatch {
        expected: PrimitiveKind,
        found: PrimitiveKind,
    },
}
