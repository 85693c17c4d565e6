use crate::record::Record;

// NOTE: numbers are kept as f64 no matter which primitive they came from or go to; that is the
// widest domain every non 64-bit-integer kind fits into exactly. 64-bit integers get their own
// variant so that u64::MAX and i64::MIN survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// missing / undefined element of a sequence. encodes as zero.
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Text(String),
    Seq(Vec<FieldValue>),
    Record(Record),
}

impl FieldValue {
    /// human-readable name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::BigInt(_) => "big integer",
            Self::Text(_) => "text",
            Self::Seq(_) => "sequence",
            Self::Record(_) => "record",
        }
    }

    pub fn try_into_vec<T>(self) -> Result<Vec<T>, FieldValueConversionError>
    where
        T: TryFrom<FieldValue, Error = FieldValueConversionError>,
    {
        match self {
            Self::Seq(values) => values.into_iter().map(T::try_from).collect(),
            other => Err(FieldValueConversionError::IncompatibleType {
                expected: "sequence",
                found: other.kind_name(),
            }),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FieldValueConversionError {
    #[error("incompatible types (expected {expected}, found {found})")]
    IncompatibleType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("value out of range of {0}")]
    OutOfRange(&'static str),
}

// into field values...

macro_rules! impl_from_number {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for FieldValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )+
    }
}

impl_from_number! { i8, u8, i16, u16, i32, u32, f32, f64 }

macro_rules! impl_from_big_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for FieldValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::BigInt(i128::from(value))
                }
            }
        )+
    }
}

impl_from_big_int! { i64, u64 }

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Record> for FieldValue {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        Self::Seq(value.into_iter().map(Into::into).collect())
    }
}

// and out of them...

macro_rules! impl_try_from_number {
    ($($ty:ty),+) => {
        $(
            impl TryFrom<FieldValue> for $ty {
                type Error = FieldValueConversionError;

                fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
                    match value {
                        FieldValue::Number(v)
                            if v.trunc() == v && v >= <$ty>::MIN as f64 && v <= <$ty>::MAX as f64 =>
                        {
                            Ok(v as $ty)
                        }
                        FieldValue::Number(_) => {
                            Err(FieldValueConversionError::OutOfRange(stringify!($ty)))
                        }
                        other => Err(FieldValueConversionError::IncompatibleType {
                            expected: "number",
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )+
    }
}

impl_try_from_number! { i8, u8, i16, u16, i32, u32 }

macro_rules! impl_try_from_big_int {
    ($($ty:ty),+) => {
        $(
            impl TryFrom<FieldValue> for $ty {
                type Error = FieldValueConversionError;

                fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
                    match value {
                        FieldValue::BigInt(v) => <$ty>::try_from(v)
                            .map_err(|_| FieldValueConversionError::OutOfRange(stringify!($ty))),
                        other => Err(FieldValueConversionError::IncompatibleType {
                            expected: "big integer",
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )+
    }
}

impl_try_from_big_int! { i64, u64 }

macro_rules! impl_try_from_inner {
    ($($variant:ident($expected:literal) => $ty:ty),+) => {
        $(
            impl TryFrom<FieldValue> for $ty {
                type Error = FieldValueConversionError;

                fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
                    match value {
                        FieldValue::$variant(value) => Ok(value),
                        other => Err(FieldValueConversionError::IncompatibleType {
                            expected: $expected,
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )+
    }
}

impl_try_from_inner! {
    Number("number") => f64,
    Bool("bool") => bool,
    Text("text") => String,
    Record("record") => Record
}

// f32 narrows on purpose; decoded float32 fields always fit.
impl TryFrom<FieldValue> for f32 {
    type Error = FieldValueConversionError;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|v| v as f32)
    }
}
