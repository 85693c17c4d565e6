use crate::error::SchemaError;
use crate::fieldkind::FieldKind;
use crate::schema::{FieldDescriptor, Schema};

/// where a field lives inside an encoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLayout {
    pub offset: usize,
    /// `element_width * repeat.unwrap_or(1)`.
    pub size: usize,
    pub element_width: usize,
    pub repeat: Option<usize>,
    /// layout of the nested record for record-kind fields.
    pub nested: Option<Layout>,
}

impl FieldLayout {
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// sizes and offsets of a schema's fields, densely packed in declaration order.
///
/// encoder and decoder both build a layout through [`Layout::new`] and never compute offsets on
/// their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub size: usize,
    pub fields: Vec<FieldLayout>,
}

impl Layout {
    pub fn new(schema: &Schema) -> Result<Self, SchemaError> {
        let mut fields = Vec::with_capacity(schema.fields().len());
        let mut offset = 0usize;

        for field in schema.fields() {
            let (element_width, nested) = element(field)?;
            let size = repeated(field, element_width)?;
            fields.push(FieldLayout {
                offset,
                size,
                element_width,
                repeat: field.repeat,
                nested,
            });
            offset = offset
                .checked_add(size)
                .ok_or_else(|| SchemaError::SizeOverflow(field.name.clone()))?;
        }

        log::debug!(
            "computed layout of {}: {} fields, {} bytes",
            schema.name().unwrap_or("<anonymous>"),
            fields.len(),
            offset
        );

        Ok(Self {
            size: offset,
            fields,
        })
    }
}

fn element(field: &FieldDescriptor) -> Result<(usize, Option<Layout>), SchemaError> {
    match (&field.kind, field.repeat) {
        (_, Some(0)) => Err(SchemaError::ZeroRepeat(field.name.clone())),
        (FieldKind::Text, None) => Err(SchemaError::ScalarText(field.name.clone())),
        (FieldKind::Text, Some(_)) => Ok((1, None)),
        (FieldKind::Primitive(primitive), _) => Ok((primitive.byte_width(), None)),
        (FieldKind::Record(schema), _) => {
            let nested = Layout::new(schema)?;
            Ok((nested.size, Some(nested)))
        }
    }
}

fn repeated(field: &FieldDescriptor, element_width: usize) -> Result<usize, SchemaError> {
    element_width
        .checked_mul(field.repeat.unwrap_or(1))
        .ok_or_else(|| SchemaError::SizeOverflow(field.name.clone()))
}

/// total byte footprint of a schema.
pub fn size(schema: &Schema) -> Result<usize, SchemaError> {
    Layout::new(schema).map(|layout| layout.size)
}

/// byte footprint of a single field.
pub fn field_size(field: &FieldDescriptor) -> Result<usize, SchemaError> {
    let (element_width, _) = element(field)?;
    repeated(field, element_width)
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::fieldkind::Primitive;

    fn sample() -> Result<Schema, SchemaError> {
        Schema::builder()
            .field("a", Primitive::I16)
            .array("b", Primitive::F32, 2)
            .text("c", 5)
            .build()
    }

    #[test]
    fn offsets_are_a_prefix_sum() -> Result<(), SchemaError> {
        let layout = Layout::new(&sample()?)?;
        let offsets: Vec<(usize, usize, usize)> = layout
            .fields
            .iter()
            .map(|f| (f.offset, f.size, f.element_width))
            .collect();

        let expected = expect![[r#"
            (
                15,
                [
                    (
                        0,
                        2,
                        2,
                    ),
                    (
                        2,
                        8,
                        4,
                    ),
                    (
                        10,
                        5,
                        1,
                    ),
                ],
            )
        "#]];
        expected.assert_debug_eq(&(layout.size, offsets));

        Ok(())
    }

    #[test]
    fn size_ignores_field_order() -> Result<(), SchemaError> {
        let reordered = Schema::builder()
            .text("c", 5)
            .field("a", Primitive::I16)
            .array("b", Primitive::F32, 2)
            .build()?;
        assert_eq!(size(&sample()?)?, 15);
        assert_eq!(size(&reordered)?, 15);
        Ok(())
    }

    #[test]
    fn nested_records() -> Result<(), SchemaError> {
        let point = Schema::builder()
            .field("x", Primitive::F64)
            .field("y", Primitive::F64)
            .field("flags", Primitive::U8)
            .build()?;
        let path = Schema::builder()
            .field("len", Primitive::U16)
            .array("points", point.clone(), 3)
            .record("origin", &point)
            .build()?;

        assert_eq!(size(&point)?, 17);
        assert_eq!(size(&path)?, 2 + 17 * 3 + 17);

        let layout = Layout::new(&path)?;
        assert_eq!(layout.fields[2].offset, 53);
        assert_eq!(layout.fields[2].end(), 70);
        assert_eq!(layout.fields[1].nested.as_ref().map(|l| l.size), Some(17));

        Ok(())
    }

    #[test]
    fn field_descriptor_size() {
        let field = FieldDescriptor::new("samples", Primitive::U64).with_repeat(4);
        assert_eq!(field.size(), Ok(32));
        assert_eq!(FieldDescriptor::new("t", FieldKind::Text).with_repeat(9).size(), Ok(9));
    }

    #[test]
    fn zero_repeat_is_rejected() -> Result<(), SchemaError> {
        let schema = Schema::builder()
            .field("a", Primitive::U8)
            .array("empty", Primitive::U32, 0)
            .build()?;
        assert_eq!(size(&schema), Err(SchemaError::ZeroRepeat("empty".into())));

        let text = Schema::builder().text("name", 0).build()?;
        assert_eq!(text.size(), Err(SchemaError::ZeroRepeat("name".into())));

        // errors inside nested schemas surface through the outer one.
        let outer = Schema::builder().record("inner", &schema).build()?;
        assert_eq!(size(&outer), Err(SchemaError::ZeroRepeat("empty".into())));

        Ok(())
    }

    #[test]
    fn scalar_text_is_rejected() -> Result<(), SchemaError> {
        let schema = Schema::builder().field("name", FieldKind::Text).build()?;
        assert_eq!(size(&schema), Err(SchemaError::ScalarText("name".into())));
        Ok(())
    }

    #[test]
    fn overflow() -> Result<(), SchemaError> {
        let schema = Schema::builder()
            .array("huge", Primitive::U16, usize::MAX)
            .build()?;
        assert_eq!(size(&schema), Err(SchemaError::SizeOverflow("huge".into())));

        let schema = Schema::builder()
            .array("a", Primitive::U8, usize::MAX)
            .field("b", Primitive::U8)
            .build()?;
        assert_eq!(size(&schema), Err(SchemaError::SizeOverflow("b".into())));

        Ok(())
    }
}
