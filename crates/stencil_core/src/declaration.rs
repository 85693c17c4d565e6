use hashbrown::HashMap;

use crate::error::SchemaError;
use crate::fieldkind::{Endianness, FieldKind, Primitive};
use crate::schema::{FieldDescriptor, Schema};
use crate::vartype::{self, ArrayLen, Expr};

/// builds schemas out of textual declarations such as `("samples", "int16[8]")`.
///
/// record types declared earlier can be referenced by name from later declarations, array lengths
/// may refer to constants registered with [`Registry::define_const`].
#[derive(Debug, Default, Clone)]
pub struct Registry {
    schemas: HashMap<String, Schema>,
    consts: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_const(&mut self, name: impl Into<String>, value: usize) {
        self.consts.insert(name.into(), value);
    }

    /// makes `schema` available as a field type under `name`.
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.schemas.insert(name.into(), schema)
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// resolves a type string into a field descriptor.
    pub fn field(&self, name: &str, var_type: &str) -> Result<FieldDescriptor, SchemaError> {
        let expr = vartype::parse(var_type)?;
        self.visit_any(name, expr)
    }

    /// resolves a `name: type` declaration.
    pub fn parse_field(&self, decl: &str) -> Result<FieldDescriptor, SchemaError> {
        let decl = vartype::parse_field(decl)?;
        self.visit_any(decl.name, decl.ty)
    }

    /// declares a record with the given fields and registers it under `name`.
    pub fn declare(&mut self, name: &str, fields: &[(&str, &str)]) -> Result<Schema, SchemaError> {
        self.declare_with(name, None, fields)
    }

    pub fn declare_with(
        &mut self,
        name: &str,
        endianness: Option<Endianness>,
        fields: &[(&str, &str)],
    ) -> Result<Schema, SchemaError> {
        let mut builder = Schema::builder().name(name);
        if let Some(endianness) = endianness {
            builder = builder.endianness(endianness);
        }
        for (field_name, var_type) in fields {
            builder = builder.push(self.field(field_name, var_type)?);
        }
        let schema = builder.build()?;
        self.insert(name, schema.clone());
        Ok(schema)
    }

    // ----

    fn visit_ident(&self, ident: &str) -> Result<FieldKind, SchemaError> {
        if ident == "char" {
            return Ok(FieldKind::Text);
        }
        if let Some(primitive) = Primitive::from_name(ident) {
            return Ok(FieldKind::Primitive(primitive));
        }
        self.schemas
            .get(ident)
            .map(|schema| FieldKind::Record(schema.clone()))
            .ok_or_else(|| SchemaError::UnknownKind(ident.to_owned()))
    }

    fn visit_len(&self, len: ArrayLen) -> Result<usize, SchemaError> {
        match len {
            ArrayLen::Num(len) => Ok(len),
            ArrayLen::Ident(ident) => self
                .consts
                .get(ident)
                .copied()
                .ok_or_else(|| SchemaError::UnknownArrayLength(ident.to_owned())),
        }
    }

    fn visit_any(&self, name: &str, expr: Expr) -> Result<FieldDescriptor, SchemaError> {
        match expr {
            Expr::Ident(ident) => Ok(FieldDescriptor::new(name, self.visit_ident(ident)?)),
            Expr::Array { expr, len } => {
                let Expr::Ident(ident) = *expr else {
                    return Err(SchemaError::UnsupportedDecl(name.to_owned()));
                };
                let repeat = self.visit_len(len)?;
                Ok(FieldDescriptor::new(name, self.visit_ident(ident)?).with_repeat(repeat))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::layout::size;

    #[test]
    fn declares_records() -> Result<(), SchemaError> {
        let mut registry = Registry::new();
        registry.define_const("MAX_POINTS", 4);

        let point = registry.declare_with(
            "Point",
            Some(Endianness::Big),
            &[("x", "float32"), ("y", "float32")],
        )?;
        let path = registry.declare(
            "Path",
            &[
                ("id", "uint64"),
                ("name", "char[12]"),
                ("points", "Point[MAX_POINTS]"),
                ("origin", "Point"),
            ],
        )?;

        assert_eq!(size(&point)?, 8);
        assert_eq!(size(&path)?, 8 + 12 + 8 * 4 + 8);
        assert_eq!(registry.get("Path"), Some(&path));

        let expected = expect![[r#"
            [
                FieldDescriptor {
                    name: "id",
                    kind: uint64,
                    repeat: None,
                },
                FieldDescriptor {
                    name: "name",
                    kind: char,
                    repeat: Some(
                        12,
                    ),
                },
                FieldDescriptor {
                    name: "points",
                    kind: Point,
                    repeat: Some(
                        4,
                    ),
                },
                FieldDescriptor {
                    name: "origin",
                    kind: Point,
                    repeat: None,
                },
            ]
        "#]];
        expected.assert_debug_eq(&path.fields());

        Ok(())
    }

    #[test]
    fn parse_field() -> Result<(), SchemaError> {
        let registry = Registry::new();
        assert_eq!(
            registry.parse_field("samples: int16[8]")?,
            FieldDescriptor::new("samples", Primitive::I16).with_repeat(8)
        );
        Ok(())
    }

    #[test]
    fn errors() {
        let registry = Registry::new();
        assert_eq!(
            registry.field("a", "int128"),
            Err(SchemaError::UnknownKind("int128".into()))
        );
        assert_eq!(
            registry.field("a", "uint8[LEN]"),
            Err(SchemaError::UnknownArrayLength("LEN".into()))
        );
        assert_eq!(
            registry.field("a", "uint8[2][2]"),
            Err(SchemaError::UnsupportedDecl("a".into()))
        );
        assert_eq!(
            registry.field("a", "uint8["),
            Err(SchemaError::VarType(vartype::Error::UnexpectedEof))
        );
    }

    #[test]
    fn zero_length_declarations_fail_at_layout() -> Result<(), SchemaError> {
        let mut registry = Registry::new();
        let schema = registry.declare("Empty", &[("name", "char[0]")])?;
        assert_eq!(size(&schema), Err(SchemaError::ZeroRepeat("name".into())));
        Ok(())
    }
}
