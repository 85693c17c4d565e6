#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! schema-driven fixed-size binary records.
//!
//! a [`Schema`] is an ordered list of typed fields; [`layout`] turns it into sizes and offsets,
//! [`encode`] and [`decode`] move [`Record`]s in and out of densely packed byte buffers.

pub(crate) mod bytebuf;
pub mod declaration;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fieldkind;
pub mod fieldvalue;
pub mod layout;
pub mod record;
pub mod schema;
pub mod schematic;

// own crate re-exports
pub use stencil_vartype as vartype;

pub use declaration::Registry;
pub use decoder::{decode, decode_into};
pub use encoder::{encode, encode_into};
pub use error::{Error, Result, SchemaError};
pub use fieldkind::{Endianness, FieldKind, Primitive};
pub use fieldvalue::{FieldValue, FieldValueConversionError};
pub use layout::{field_size, size, FieldLayout, Layout};
pub use record::Record;
pub use schema::{FieldDescriptor, Schema, SchemaBuilder};
pub use schematic::{decode_value, encode_value, take_field, Schematic};

// NOTE: a schema whose nested record declares no byte order inherits the byte order of the
// enclosing record. nested records that do declare one keep it.

// TODO: cache the computed Layout inside Schema (OnceLock) once profiling shows layout
// construction in encode/decode hot loops.
