use crate::fieldvalue::FieldValueConversionError;
use crate::vartype;

/// malformed schema. always reported before any byte of a buffer is read or written.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field {0:?} has a zero-length repeat count")]
    ZeroRepeat(String),
    #[error("text field {0:?} has no repeat count")]
    ScalarText(String),
    #[error("duplicate field name {0:?}")]
    DuplicateField(String),
    #[error("unknown field kind {0:?}")]
    UnknownKind(String),
    #[error("unknown array length ident {0:?}")]
    UnknownArrayLength(String),
    #[error("unsupported type declaration for field {0:?}")]
    UnsupportedDecl(String),
    #[error("size of field {0:?} overflows usize")]
    SizeOverflow(String),
    #[error("layout of record field {0:?} carries no nested layout")]
    MissingNestedLayout(String),
    #[error(transparent)]
    VarType(#[from] vartype::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("field {field:?}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("buffer too small (want {want}, got {got})")]
    BufferTooSmall { want: usize, got: usize },
    #[error("field {field:?}: {source}")]
    Conversion {
        field: String,
        source: FieldValueConversionError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
