use std::fmt::Debug;

use crate::schema::Schema;

/// fixed-width numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl Primitive {
    pub const ALL: [Primitive; 10] = [
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    #[inline(always)]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// 64-bit integers live in the big-integer value domain, everything else is a plain number.
    #[inline(always)]
    pub const fn is_big_int(self) -> bool {
        matches!(self, Self::I64 | Self::U64)
    }

    #[inline(always)]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    #[inline(always)]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "int8",
            Self::U8 => "uint8",
            Self::I16 => "int16",
            Self::U16 => "uint16",
            Self::I32 => "int32",
            Self::U32 => "uint32",
            Self::I64 => "int64",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

#[derive(Clone, PartialEq)]
pub enum FieldKind {
    Primitive(Primitive),
    /// one byte per character slot; the slot count comes from the field's repeat.
    Text,
    Record(Schema),
}

impl FieldKind {
    #[inline(always)]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    #[inline(always)]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    #[inline(always)]
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Record(_))
    }
}

impl From<Primitive> for FieldKind {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<Schema> for FieldKind {
    fn from(value: Schema) -> Self {
        Self::Record(value)
    }
}

// NOTE: nested schemas print by name only, full trees make snapshots unreadable.
impl Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.name()),
            Self::Text => f.write_str("char"),
            Self::Record(schema) => f.write_str(schema.name().unwrap_or("<anonymous>")),
        }
    }
}

/// byte order applied to every numeric field of a schema.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_widths() {
        let widths: Vec<usize> = Primitive::ALL.iter().map(|p| p.byte_width()).collect();
        assert_eq!(widths, [1, 1, 2, 2, 4, 4, 8, 8, 4, 8]);
    }

    #[test]
    fn names_round_trip() {
        for p in Primitive::ALL {
            assert_eq!(Primitive::from_name(p.name()), Some(p));
        }
        assert_eq!(Primitive::from_name("char"), None);
        assert_eq!(Primitive::from_name("bool"), None);
    }

    #[test]
    fn classification() {
        let numeric = FieldKind::from(Primitive::F64);
        assert!(numeric.is_numeric() && !numeric.is_text() && !numeric.is_nested());
        assert!(FieldKind::Text.is_text());
        assert!(Primitive::U64.is_big_int() && !Primitive::U32.is_big_int());
    }
}
