use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{Error, Result};
use crate::fieldvalue::FieldValue;
use crate::record::Record;
use crate::schema::Schema;

/// binds a rust type to a schema.
///
/// implementors describe their layout once in [`Schematic::schema`] and convert to and from the
/// dynamic [`Record`] form; [`encode_value`] and [`decode_value`] do the rest.
pub trait Schematic: Sized {
    fn schema() -> Schema;
    fn to_record(&self) -> Record;
    fn from_record(record: Record) -> Result<Self>;
}

pub fn encode_value<T: Schematic>(value: &T) -> Result<Vec<u8>> {
    encode(&T::schema(), &value.to_record())
}

pub fn decode_value<T: Schematic>(buf: &[u8]) -> Result<T> {
    T::from_record(decode(&T::schema(), buf)?)
}

/// takes field `name` out of `record` and converts it, for use in [`Schematic::from_record`].
pub fn take_field<T>(record: &mut Record, name: &str) -> Result<T>
where
    T: TryFrom<FieldValue, Error = crate::fieldvalue::FieldValueConversionError>,
{
    let Some(value) = record.remove(name) else {
        return Err(Error::TypeMismatch {
            field: name.to_owned(),
            expected: "value",
            found: "nothing",
        });
    };
    T::try_from(value).map_err(|source| Error::Conversion {
        field: name.to_owned(),
        source,
    })
}
