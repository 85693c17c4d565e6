use std::fmt::Debug;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::error::SchemaError;
use crate::fieldkind::{Endianness, FieldKind};
use crate::layout;

/// one schema entry. `repeat` turns the field into a fixed-length array (or, for text, sets the
/// slot count); `None` means a scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub repeat: Option<usize>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            repeat: None,
        }
    }

    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// byte footprint of this field, `element width * repeat`.
    pub fn size(&self) -> Result<usize, SchemaError> {
        layout::field_size(self)
    }
}

#[derive(PartialEq)]
struct SchemaInner {
    name: Option<String>,
    endianness: Option<Endianness>,
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

/// ordered, immutable list of field descriptors.
///
/// cloning is cheap (reference counted) and a schema can be shared between threads; nothing can
/// mutate it once [`SchemaBuilder::build`] returned.
#[derive(Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// byte order declared by this schema. `None` means that the schema inherits the byte order of
    /// whatever encloses it, or [`Endianness::Little`] at the top level.
    #[inline]
    pub fn endianness(&self) -> Option<Endianness> {
        self.inner.endianness
    }

    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.inner.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.inner
            .index
            .get(name)
            .and_then(|&i| self.inner.fields.get(i))
    }

    /// total byte footprint of a record.
    pub fn size(&self) -> Result<usize, SchemaError> {
        layout::size(self)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.inner.name)
            .field("endianness", &self.inner.endianness)
            .field("fields", &self.inner.fields)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    name: Option<String>,
    endianness: Option<Endianness>,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = Some(endianness);
        self
    }

    pub fn push(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(self, name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        self.push(FieldDescriptor::new(name, kind))
    }

    pub fn array(self, name: impl Into<String>, kind: impl Into<FieldKind>, repeat: usize) -> Self {
        self.push(FieldDescriptor::new(name, kind).with_repeat(repeat))
    }

    pub fn text(self, name: impl Into<String>, len: usize) -> Self {
        self.push(FieldDescriptor::new(name, FieldKind::Text).with_repeat(len))
    }

    pub fn record(self, name: impl Into<String>, schema: &Schema) -> Self {
        self.push(FieldDescriptor::new(name, schema.clone()))
    }

    // NOTE: repeat counts and kinds are checked by the layout engine, which runs on every size /
    // encode / decode call. only structural problems are rejected here.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            if index.insert(field.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Schema {
            inner: Arc::new(SchemaInner {
                name: self.name,
                endianness: self.endianness,
                fields: self.fields,
                index,
            }),
        })
    }
}
