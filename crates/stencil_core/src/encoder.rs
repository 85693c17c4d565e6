use crate::bytebuf::put_uint;
use crate::error::{Error, Result, SchemaError};
use crate::fieldkind::{Endianness, FieldKind, Primitive};
use crate::fieldvalue::FieldValue;
use crate::layout::{FieldLayout, Layout};
use crate::record::Record;
use crate::schema::{FieldDescriptor, Schema};

/// element of a repeated field after coercion, before it is narrowed to its primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scalar {
    Int(i128),
    Float(f64),
}

impl Scalar {
    /// raw bit pattern of the scalar as `primitive`, widened to u64. integer kinds wrap modulo
    /// 2^bits once [`put_uint`] cuts the pattern down to the field width.
    fn to_bits(self, primitive: Primitive) -> u64 {
        match (primitive, self) {
            (Primitive::F32, Self::Float(v)) => u64::from((v as f32).to_bits()),
            (Primitive::F32, Self::Int(v)) => u64::from((v as f32).to_bits()),
            (Primitive::F64, Self::Float(v)) => v.to_bits(),
            (Primitive::F64, Self::Int(v)) => (v as f64).to_bits(),
            (_, Self::Int(v)) => v as u64,
            (_, Self::Float(v)) => wrap_float(v),
        }
    }
}

// truncates toward zero, then reduces modulo 2^64. nan and infinities become zero.
#[inline]
fn wrap_float(v: f64) -> u64 {
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
    if !v.is_finite() {
        return 0;
    }
    (v.trunc() % TWO_POW_64) as i128 as u64
}

fn mismatch(field: &FieldDescriptor, expected: &'static str, found: &'static str) -> Error {
    Error::TypeMismatch {
        field: field.name.clone(),
        expected,
        found,
    }
}

// per-element rule of repeated fields: chars become their code, bools 1/0, missing 0.
fn coerce(field: &FieldDescriptor, value: &FieldValue) -> Result<Scalar> {
    match value {
        FieldValue::Null => Ok(Scalar::Int(0)),
        FieldValue::Bool(v) => Ok(Scalar::Int(i128::from(*v))),
        FieldValue::Number(v) => Ok(Scalar::Float(*v)),
        FieldValue::BigInt(v) => Ok(Scalar::Int(*v)),
        FieldValue::Text(v) => Ok(Scalar::Int(
            v.chars().next().map_or(0, |ch| i128::from(u32::from(ch))),
        )),
        other @ (FieldValue::Seq(_) | FieldValue::Record(_)) => {
            Err(mismatch(field, "number", other.kind_name()))
        }
    }
}

struct Encoder {
    endianness: Endianness,
}

impl Encoder {
    fn encode_record(
        &self,
        schema: &Schema,
        layout: &Layout,
        record: &Record,
        buf: &mut [u8],
    ) -> Result<()> {
        for (field, field_layout) in schema.fields().iter().zip(&layout.fields) {
            let dst = &mut buf[field_layout.offset..field_layout.end()];
            let Some(value) = record.get(&field.name) else {
                return Err(mismatch(field, expected(field), "nothing"));
            };
            match field.repeat {
                Some(repeat) => self.encode_repeated(field, field_layout, value, repeat, dst)?,
                None => self.encode_scalar(field, field_layout, value, dst)?,
            }
        }
        Ok(())
    }

    fn encode_scalar(
        &self,
        field: &FieldDescriptor,
        field_layout: &FieldLayout,
        value: &FieldValue,
        dst: &mut [u8],
    ) -> Result<()> {
        match (&field.kind, value) {
            (FieldKind::Primitive(p), FieldValue::Number(v)) if !p.is_big_int() => {
                put_uint(dst, Scalar::Float(*v).to_bits(*p), self.endianness);
            }
            (FieldKind::Primitive(p), FieldValue::BigInt(v)) if p.is_big_int() => {
                put_uint(dst, Scalar::Int(*v).to_bits(*p), self.endianness);
            }
            (FieldKind::Record(schema), FieldValue::Record(record)) => {
                self.encode_nested(field, schema, field_layout, record, dst)?;
            }
            (FieldKind::Text, _) => {
                return Err(SchemaError::ScalarText(field.name.clone()).into());
            }
            (_, other) => return Err(mismatch(field, expected(field), other.kind_name())),
        }
        Ok(())
    }

    fn encode_repeated(
        &self,
        field: &FieldDescriptor,
        field_layout: &FieldLayout,
        value: &FieldValue,
        repeat: usize,
        dst: &mut [u8],
    ) -> Result<()> {
        let width = field_layout.element_width;

        match (&field.kind, value) {
            // text given as a string is its sequence of character codes.
            (FieldKind::Text, FieldValue::Text(text)) => {
                for (slot, ch) in dst.chunks_exact_mut(width).zip(text.chars().take(repeat)) {
                    let code = Scalar::Int(i128::from(u32::from(ch)));
                    put_uint(slot, code.to_bits(Primitive::U8), self.endianness);
                }
            }
            (FieldKind::Record(schema), FieldValue::Seq(values)) => {
                for (i, value) in values.iter().take(repeat).enumerate() {
                    let FieldValue::Record(record) = value else {
                        return Err(mismatch(field, "record", value.kind_name()));
                    };
                    let slot = &mut dst[i * width..(i + 1) * width];
                    self.encode_nested(field, schema, field_layout, record, slot)?;
                }
            }
            (kind, FieldValue::Seq(values)) => {
                let primitive = match kind {
                    FieldKind::Primitive(p) => *p,
                    _ => Primitive::U8,
                };
                for (slot, value) in dst.chunks_exact_mut(width).zip(values.iter().take(repeat)) {
                    put_uint(slot, coerce(field, value)?.to_bits(primitive), self.endianness);
                }
            }
            (_, other) => return Err(mismatch(field, expected(field), other.kind_name())),
        }
        Ok(())
    }

    fn encode_nested(
        &self,
        field: &FieldDescriptor,
        schema: &Schema,
        field_layout: &FieldLayout,
        record: &Record,
        dst: &mut [u8],
    ) -> Result<()> {
        let layout = field_layout
            .nested
            .as_ref()
            .ok_or_else(|| SchemaError::MissingNestedLayout(field.name.clone()))?;
        let nested = Encoder {
            endianness: schema.endianness().unwrap_or(self.endianness),
        };
        nested.encode_record(schema, layout, record, dst)
    }
}

fn expected(field: &FieldDescriptor) -> &'static str {
    match (&field.kind, field.repeat) {
        (FieldKind::Text, _) => "text or sequence",
        (_, Some(_)) => "sequence",
        (FieldKind::Primitive(p), None) if p.is_big_int() => "big integer",
        (FieldKind::Primitive(_), None) => "number",
        (FieldKind::Record(_), None) => "record",
    }
}

fn encode_with(schema: &Schema, layout: &Layout, record: &Record) -> Result<Vec<u8>> {
    // zero-initialized: unused trailing slots of short arrays and text stay zero.
    let mut buf = vec![0u8; layout.size];
    let encoder = Encoder {
        endianness: schema.endianness().unwrap_or_default(),
    };
    encoder.encode_record(schema, layout, record, &mut buf)?;
    log::trace!(
        "encoded {} ({} bytes)",
        schema.name().unwrap_or("<anonymous>"),
        buf.len()
    );
    Ok(buf)
}

/// encodes `record` into a new buffer of exactly `size(schema)` bytes.
pub fn encode(schema: &Schema, record: &Record) -> Result<Vec<u8>> {
    let layout = Layout::new(schema)?;
    encode_with(schema, &layout, record)
}

/// encodes `record` into the start of `dst` and returns the number of bytes written.
///
/// `dst` is left untouched if encoding fails.
pub fn encode_into(schema: &Schema, record: &Record, dst: &mut [u8]) -> Result<usize> {
    let layout = Layout::new(schema)?;
    if dst.len() < layout.size {
        return Err(Error::BufferTooSmall {
            want: layout.size,
            got: dst.len(),
        });
    }
    let buf = encode_with(schema, &layout, record)?;
    dst[..buf.len()].copy_from_slice(&buf);
    Ok(buf.len())
}
