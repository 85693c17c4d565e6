// stencilinfo prints the layout of records declared in a text file and can decode a binary file
// against one of them.
//
// declaration file syntax:
//
//   # comment
//   const MAX_POINTS 4
//   record Point big
//     x: int16
//     y: int16
//   record Path
//     id: uint32
//     points: Point[MAX_POINTS]

use std::fs;

use anyhow::{anyhow, bail, Context, Result};
use stencil::{decode, Endianness, FieldDescriptor, Layout, Registry, Schema};

struct Pending {
    name: String,
    endianness: Option<Endianness>,
    fields: Vec<FieldDescriptor>,
}

fn parse_endianness(word: &str) -> Result<Endianness> {
    match word {
        "big" => Ok(Endianness::Big),
        "little" => Ok(Endianness::Little),
        _ => bail!("unknown byte order {word:?} (want big or little)"),
    }
}

fn finish(registry: &mut Registry, order: &mut Vec<String>, pending: Pending) -> Result<()> {
    let mut builder = Schema::builder().name(pending.name.as_str());
    if let Some(endianness) = pending.endianness {
        builder = builder.endianness(endianness);
    }
    for field in pending.fields {
        builder = builder.push(field);
    }
    let schema = builder
        .build()
        .with_context(|| format!("record {}", pending.name))?;
    log::debug!("declared record {}", pending.name);
    registry.insert(pending.name.as_str(), schema);
    order.push(pending.name);
    Ok(())
}

fn load(input: &str) -> Result<(Registry, Vec<String>)> {
    let mut registry = Registry::new();
    let mut order = Vec::new();
    let mut pending: Option<Pending> = None;

    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let lineno = i + 1;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["const", name, value] => {
                let value = value
                    .parse::<usize>()
                    .with_context(|| format!("line {lineno}: invalid const value"))?;
                registry.define_const(*name, value);
            }
            ["record", name, rest @ ..] => {
                if let Some(prev) = pending.take() {
                    finish(&mut registry, &mut order, prev)?;
                }
                let endianness = match rest {
                    [] => None,
                    [word] => Some(parse_endianness(word)?),
                    _ => bail!("line {lineno}: trailing words after record {name}"),
                };
                pending = Some(Pending {
                    name: name.to_string(),
                    endianness,
                    fields: Vec::new(),
                });
            }
            _ => {
                let Some(current) = pending.as_mut() else {
                    bail!("line {lineno}: field declared outside of a record");
                };
                let field = registry
                    .parse_field(line)
                    .with_context(|| format!("line {lineno}"))?;
                current.fields.push(field);
            }
        }
    }

    if let Some(prev) = pending.take() {
        finish(&mut registry, &mut order, prev)?;
    }
    Ok((registry, order))
}

fn lookup<'a>(registry: &'a Registry, name: &str) -> Result<&'a Schema> {
    registry.get(name).ok_or_else(|| {
        let mut known: Vec<&str> = registry.names().collect();
        known.sort_unstable();
        anyhow!("unknown record {name} (known: {})", known.join(", "))
    })
}

fn print_layout(name: &str, schema: &Schema) -> Result<()> {
    let layout = Layout::new(schema).with_context(|| format!("record {name}"))?;
    let endianness = match schema.endianness() {
        Some(Endianness::Big) => "big endian",
        Some(Endianness::Little) => "little endian",
        None => "inherited byte order",
    };
    println!("{name} ({} bytes, {endianness})", layout.size);
    println!("  {:>6}  {:>6}  field", "offset", "size");
    for (field, field_layout) in schema.fields().iter().zip(&layout.fields) {
        let repeat = field.repeat.map(|n| format!("[{n}]")).unwrap_or_default();
        println!(
            "  {:>6}  {:>6}  {}: {:?}{}",
            field_layout.offset, field_layout.size, field.name, field.kind, repeat
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(decls_path) = args.get(1) else {
        eprintln!("usage: stencilinfo <declarations> [record binfile]");
        std::process::exit(42);
    };

    let input = fs::read_to_string(decls_path).with_context(|| format!("read {decls_path}"))?;
    let (registry, order) = load(&input)?;

    match (args.get(2), args.get(3)) {
        (Some(record_name), Some(bin_path)) => {
            let schema = lookup(&registry, record_name)?;
            let buf = fs::read(bin_path).with_context(|| format!("read {bin_path}"))?;
            let record = decode(schema, &buf)?;
            println!("{record:#?}");
        }
        (None, None) => {
            for name in &order {
                if let Some(schema) = registry.get(name) {
                    print_layout(name, schema)?;
                }
            }
        }
        _ => bail!("both a record name and a binary file are required to decode"),
    }

    Ok(())
}
