use crate::bytebuf::get_uint;
use crate::error::{Error, Result, SchemaError};
use crate::fieldkind::{Endianness, FieldKind, Primitive};
use crate::fieldvalue::FieldValue;
use crate::layout::{FieldLayout, Layout};
use crate::record::Record;
use crate::schema::{FieldDescriptor, Schema};

/// turns the raw bit pattern of a primitive back into a value. 64-bit integers come out as
/// [`FieldValue::BigInt`], everything else as [`FieldValue::Number`].
fn primitive_value(primitive: Primitive, bits: u64) -> FieldValue {
    match primitive {
        Primitive::I8 => FieldValue::Number(f64::from(bits as u8 as i8)),
        Primitive::U8 => FieldValue::Number(f64::from(bits as u8)),
        Primitive::I16 => FieldValue::Number(f64::from(bits as u16 as i16)),
        Primitive::U16 => FieldValue::Number(f64::from(bits as u16)),
        Primitive::I32 => FieldValue::Number(f64::from(bits as u32 as i32)),
        Primitive::U32 => FieldValue::Number(f64::from(bits as u32)),
        Primitive::I64 => FieldValue::BigInt(i128::from(bits as i64)),
        Primitive::U64 => FieldValue::BigInt(i128::from(bits)),
        Primitive::F32 => FieldValue::Number(f64::from(f32::from_bits(bits as u32))),
        Primitive::F64 => FieldValue::Number(f64::from_bits(bits)),
    }
}

/// recovers text from a fixed-width slot: everything after the last non-zero byte is padding.
///
/// NOTE: a slot that is entirely zero is returned as-is (`len` NUL chars), not as an empty
/// string.
fn text_value(slot: &[u8]) -> String {
    let text = match slot.iter().rposition(|&b| b != 0) {
        Some(last) => &slot[..=last],
        None => slot,
    };
    // one char per byte, byte value is the char code.
    text.iter().map(|&b| char::from(b)).collect()
}

struct Decoder {
    endianness: Endianness,
}

impl Decoder {
    fn decode_record(&self, schema: &Schema, layout: &Layout, src: &[u8]) -> Result<Record> {
        let mut record = Record::new();
        for (field, field_layout) in schema.fields().iter().zip(&layout.fields) {
            let slot = &src[field_layout.offset..field_layout.end()];
            let value = self.decode_field(field, field_layout, slot)?;
            record.insert(field.name.as_str(), value);
        }
        Ok(record)
    }

    fn decode_field(
        &self,
        field: &FieldDescriptor,
        field_layout: &FieldLayout,
        slot: &[u8],
    ) -> Result<FieldValue> {
        let width = field_layout.element_width;
        let value = match (&field.kind, field.repeat) {
            (FieldKind::Primitive(p), None) => primitive_value(*p, get_uint(slot, self.endianness)),
            (FieldKind::Primitive(p), Some(_)) => FieldValue::Seq(
                slot.chunks_exact(width)
                    .map(|element| primitive_value(*p, get_uint(element, self.endianness)))
                    .collect(),
            ),
            (FieldKind::Text, Some(_)) => FieldValue::Text(text_value(slot)),
            (FieldKind::Text, None) => {
                return Err(SchemaError::ScalarText(field.name.clone()).into());
            }
            (FieldKind::Record(schema), None) => {
                FieldValue::Record(self.decode_nested(field, schema, field_layout, slot)?)
            }
            (FieldKind::Record(schema), Some(repeat)) => FieldValue::Seq(
                (0..repeat)
                    .map(|i| {
                        let element = &slot[i * width..(i + 1) * width];
                        self.decode_nested(field, schema, field_layout, element)
                            .map(FieldValue::Record)
                    })
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(value)
    }

    fn decode_nested(
        &self,
        field: &FieldDescriptor,
        schema: &Schema,
        field_layout: &FieldLayout,
        src: &[u8],
    ) -> Result<Record> {
        let layout = field_layout
            .nested
            .as_ref()
            .ok_or_else(|| SchemaError::MissingNestedLayout(field.name.clone()))?;
        let nested = Decoder {
            endianness: schema.endianness().unwrap_or(self.endianness),
        };
        nested.decode_record(schema, layout, src)
    }
}

/// decodes a record from the first `size(schema)` bytes of `buf`. trailing bytes are ignored.
pub fn decode(schema: &Schema, buf: &[u8]) -> Result<Record> {
    let layout = Layout::new(schema)?;
    if buf.len() < layout.size {
        return Err(Error::BufferTooSmall {
            want: layout.size,
            got: buf.len(),
        });
    }

    let decoder = Decoder {
        endianness: schema.endianness().unwrap_or_default(),
    };
    let record = decoder.decode_record(schema, &layout, &buf[..layout.size])?;
    log::trace!(
        "decoded {} ({} bytes)",
        schema.name().unwrap_or("<anonymous>"),
        layout.size
    );
    Ok(record)
}

/// decodes into an existing record, overwriting the fields the schema declares and keeping the
/// rest. `out` is only touched when decoding succeeds.
pub fn decode_into(schema: &Schema, buf: &[u8], out: &mut Record) -> Result<()> {
    let record = decode(schema, buf)?;
    out.merge(record);
    Ok(())
}
