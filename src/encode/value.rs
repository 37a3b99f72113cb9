//! Value encoder: model values → wire value records.
//!
//! Dispatch is an exhaustive match over the closed [`ValueKind`] / [`ItemKind`]
//! sets, so a new variant fails compilation here instead of silently skipping
//! records at runtime. The source string pool is threaded through explicitly;
//! when no pool is supplied (the standalone-item path), sources are omitted
//! entirely.

use crate::pool::StringPool;
use crate::schema;
use crate::types::{
    Array, Attribute, ItemKind, Plural, Reference, ReferenceType, Source, Style, Styleable, Value,
    ValueKind,
};

/// Encodes a full value, including its comment, weak flag, and (when a pool
/// is supplied) its source reference.
///
/// Every reference source encountered, directly or nested, may intern a path
/// into `src_pool`.
pub fn encode_value(value: &Value, mut src_pool: Option<&mut StringPool>) -> schema::Value {
    let body = match &value.kind {
        ValueKind::Item(kind) => schema::ValueBody::Item(encode_item(kind)),
        ValueKind::Attribute(attr) => compound(schema::CompoundValue::Attr(encode_attribute(
            attr,
            &mut src_pool,
        ))),
        ValueKind::Style(style) => {
            compound(schema::CompoundValue::Style(encode_style(style, &mut src_pool)))
        }
        ValueKind::Styleable(styleable) => compound(schema::CompoundValue::Styleable(
            encode_styleable(styleable, &mut src_pool),
        )),
        ValueKind::Array(array) => {
            compound(schema::CompoundValue::Array(encode_array(array, &mut src_pool)))
        }
        ValueKind::Plural(plural) => {
            compound(schema::CompoundValue::Plural(encode_plural(plural, &mut src_pool)))
        }
    };

    schema::Value {
        body,
        comment: value.comment.clone(),
        weak: value.weak,
        source: src_pool.map(|pool| encode_source(&value.source, pool)),
    }
}

/// Encodes a standalone scalar item, with no string pool and therefore no
/// source. Used for nested items and XML-embedded compiled values.
pub fn encode_item(kind: &ItemKind) -> schema::Item {
    match kind {
        ItemKind::Reference(reference) => schema::Item::Ref(encode_reference(reference)),
        ItemKind::String(value) => schema::Item::Str {
            value: value.clone(),
        },
        ItemKind::RawString(value) => schema::Item::RawStr {
            value: value.clone(),
        },
        ItemKind::StyledString(styled) => schema::Item::StyledStr {
            value: styled.value.clone(),
            spans: styled
                .spans
                .iter()
                .map(|span| schema::Span {
                    tag: span.tag.clone(),
                    first_char: span.first_char,
                    last_char: span.last_char,
                })
                .collect(),
        },
        ItemKind::FileReference(path) => schema::Item::File { path: path.clone() },
        ItemKind::Id => schema::Item::Id,
        ItemKind::Primitive(prim) => {
            let (data_type, data) = prim.flatten();
            schema::Item::Prim(schema::Primitive {
                data_type: data_type.into(),
                data,
            })
        }
    }
}

fn compound(value: schema::CompoundValue) -> schema::ValueBody {
    schema::ValueBody::CompoundValue(value)
}

pub(crate) fn encode_reference(reference: &Reference) -> schema::Reference {
    schema::Reference {
        id: reference.id.unwrap_or_default().0,
        name: reference.name.clone().unwrap_or_default(),
        private: reference.private,
        reference_type: match reference.reference_type {
            // Resource doubles as the wire fallback for any kind the decoder
            // does not know; keep it first in the closed set.
            ReferenceType::Resource => schema::ReferenceType::Reference,
            ReferenceType::Attribute => schema::ReferenceType::Attribute,
        },
    }
}

/// Interns the source path and emits a pool-relative source reference.
pub(crate) fn encode_source(source: &Source, src_pool: &mut StringPool) -> schema::SourceRef {
    let path_ref = src_pool.make_ref(&source.path);
    schema::SourceRef {
        path_idx: path_ref.index(),
        position: source.line.map(|line| schema::SourcePosition {
            line_number: line,
            column_number: 0,
        }),
    }
}

fn encode_meta(
    comment: &str,
    source: &Source,
    src_pool: &mut Option<&mut StringPool>,
) -> (Option<schema::SourceRef>, String) {
    let source_ref = src_pool
        .as_deref_mut()
        .map(|pool| encode_source(source, pool));
    (source_ref, comment.to_string())
}

fn encode_attribute(attr: &Attribute, src_pool: &mut Option<&mut StringPool>) -> schema::Attribute {
    schema::Attribute {
        format_flags: attr.format_flags,
        min_int: attr.min_int,
        max_int: attr.max_int,
        symbols: attr
            .symbols
            .iter()
            .map(|symbol| {
                let (source, comment) = encode_meta(&symbol.comment, &symbol.source, src_pool);
                schema::AttributeSymbol {
                    source,
                    comment,
                    name: encode_reference(&symbol.name),
                    value: symbol.value,
                }
            })
            .collect(),
    }
}

fn encode_style(style: &Style, src_pool: &mut Option<&mut StringPool>) -> schema::Style {
    let (parent, parent_source) = match &style.parent {
        Some(parent) => (
            Some(encode_reference(&parent.reference)),
            src_pool
                .as_deref_mut()
                .map(|pool| encode_source(&parent.source, pool)),
        ),
        None => (None, None),
    };

    schema::Style {
        parent,
        parent_source,
        entries: style
            .entries
            .iter()
            .map(|entry| {
                let (source, comment) = encode_meta(&entry.comment, &entry.source, src_pool);
                schema::StyleEntry {
                    source,
                    comment,
                    key: encode_reference(&entry.key),
                    item: encode_item(&entry.item.kind),
                }
            })
            .collect(),
    }
}

fn encode_styleable(
    styleable: &Styleable,
    src_pool: &mut Option<&mut StringPool>,
) -> schema::Styleable {
    schema::Styleable {
        entries: styleable
            .entries
            .iter()
            .map(|entry| {
                let (source, comment) = encode_meta(&entry.comment, &entry.source, src_pool);
                schema::StyleableEntry {
                    source,
                    comment,
                    attr: encode_reference(&entry.attr),
                }
            })
            .collect(),
    }
}

fn encode_array(array: &Array, src_pool: &mut Option<&mut StringPool>) -> schema::Array {
    schema::Array {
        elements: array
            .elements
            .iter()
            .map(|element| {
                let (source, comment) = encode_meta(&element.comment, &element.source, src_pool);
                schema::ArrayElement {
                    source,
                    comment,
                    item: encode_item(&element.kind),
                }
            })
            .collect(),
    }
}

fn encode_plural(plural: &Plural, src_pool: &mut Option<&mut StringPool>) -> schema::Plural {
    let mut entries = Vec::new();
    for (arity, slot) in schema::Arity::ALL.iter().zip(&plural.values) {
        // Sparse: unpopulated slots are never emitted, not even as
        // placeholders.
        let Some(item) = slot else {
            continue;
        };
        let (source, comment) = encode_meta(&item.comment, &item.source, src_pool);
        entries.push(schema::PluralEntry {
            arity: *arity,
            source,
            comment,
            item: encode_item(&item.kind),
        });
    }
    schema::Plural { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Arity, AttributeSymbol, Item, Primitive, ResourceId, Span, StyleEntry, StyleParent,
        StyleableEntry, StyledString,
    };

    fn reference_value() -> Value {
        Value::item(ItemKind::Reference(Reference {
            id: Some(ResourceId(0x7f010000)),
            name: Some("com.example:string/app_name".to_string()),
            private: false,
            reference_type: ReferenceType::Resource,
        }))
    }

    #[test]
    fn test_encode_reference_exact() {
        let out = encode_value(&reference_value(), None);
        let schema::ValueBody::Item(schema::Item::Ref(reference)) = out.body else {
            panic!("expected a reference item");
        };
        assert_eq!(
            reference,
            schema::Reference {
                id: 0x7f010000,
                name: "com.example:string/app_name".to_string(),
                private: false,
                reference_type: schema::ReferenceType::Reference,
            }
        );
    }

    #[test]
    fn test_unset_reference_id_defaults_to_zero() {
        let out = encode_item(&ItemKind::Reference(Reference::named("style/base")));
        let schema::Item::Ref(reference) = out else {
            panic!("expected a reference item");
        };
        assert_eq!(reference.id, 0x0);
    }

    #[test]
    fn test_comment_and_weak_pass_through_every_variant() {
        let kinds = vec![
            ValueKind::Item(ItemKind::String("hello".to_string())),
            ValueKind::Attribute(Attribute {
                format_flags: 1,
                min_int: i32::MIN,
                max_int: i32::MAX,
                symbols: vec![],
            }),
            ValueKind::Style(Style::default()),
            ValueKind::Styleable(Styleable::default()),
            ValueKind::Array(Array::default()),
            ValueKind::Plural(Plural::default()),
        ];
        for kind in kinds {
            let value = Value {
                kind,
                comment: "a comment".to_string(),
                weak: true,
                source: Source::new("res/values/styles.xml"),
            };
            let out = encode_value(&value, None);
            assert_eq!(out.comment, value.comment);
            assert_eq!(out.weak, value.is_weak());
            assert_eq!(out.source, None);
        }
    }

    #[test]
    fn test_source_emitted_only_with_pool() {
        let mut value = reference_value();
        value.source = Source::with_line("res/values/strings.xml", 7);

        let mut pool = StringPool::new();
        let with_pool = encode_value(&value, Some(&mut pool));
        let source = with_pool.source.expect("source with pool");
        assert_eq!(pool.len(), 1);
        // make_ref is idempotent, so it reveals the interned index.
        assert_eq!(pool.make_ref("res/values/strings.xml").index(), source.path_idx);
        assert_eq!(source.position.unwrap().line_number, 7);

        let without_pool = encode_value(&value, None);
        assert_eq!(without_pool.source, None);
    }

    #[test]
    fn test_styled_string_spans() {
        let styled = StyledString {
            value: "bold and italic".to_string(),
            spans: vec![
                Span {
                    tag: "b".to_string(),
                    first_char: 0,
                    last_char: 3,
                },
                Span {
                    tag: "i".to_string(),
                    first_char: 9,
                    last_char: 14,
                },
            ],
        };
        let out = encode_item(&ItemKind::StyledString(styled));
        let schema::Item::StyledStr { value, spans } = out else {
            panic!("expected a styled string");
        };
        assert_eq!(value, "bold and italic");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].tag, "b");
        assert_eq!(spans[1].first_char, 9);
        assert_eq!(spans[1].last_char, 14);
    }

    #[test]
    fn test_primitive_flattens_to_typed_pair() {
        let out = encode_item(&ItemKind::Primitive(Primitive {
            data_type: 0x1d,
            data: 0xff00ff00,
        }));
        assert_eq!(
            out,
            schema::Item::Prim(schema::Primitive {
                data_type: 0x1d,
                data: 0xff00ff00,
            })
        );
    }

    #[test]
    fn test_plural_sparse_slots() {
        let mut plural = Plural::default();
        plural.set(Arity::One, Item::new(ItemKind::String("1 apple".into())));
        plural.set(Arity::Many, Item::new(ItemKind::String("%d apples".into())));

        let value = Value::new(ValueKind::Plural(plural));
        let out = encode_value(&value, None);
        let schema::ValueBody::CompoundValue(schema::CompoundValue::Plural(plural)) = out.body
        else {
            panic!("expected a plural");
        };
        assert_eq!(plural.entries.len(), 2);
        assert_eq!(plural.entries[0].arity, Arity::One);
        assert_eq!(plural.entries[1].arity, Arity::Many);
    }

    #[test]
    fn test_style_parent_source_recorded_separately() {
        let style = Style {
            parent: Some(StyleParent {
                reference: Reference::named("style/Base"),
                source: Source::with_line("res/values/styles.xml", 3),
            }),
            entries: vec![StyleEntry {
                key: Reference::named("attr/textColor"),
                comment: String::new(),
                source: Source::with_line("res/values/styles.xml", 4),
                item: Item::new(ItemKind::String("#ff0000".into())),
            }],
        };
        let mut value = Value::new(ValueKind::Style(style));
        value.source = Source::with_line("res/values/styles.xml", 2);

        let mut pool = StringPool::new();
        let out = encode_value(&value, Some(&mut pool));
        let schema::ValueBody::CompoundValue(schema::CompoundValue::Style(style)) = out.body else {
            panic!("expected a style");
        };
        assert_eq!(style.parent.unwrap().name, "style/Base");
        assert_eq!(style.parent_source.unwrap().position.unwrap().line_number, 3);
        assert_eq!(style.entries[0].source.as_ref().unwrap().position.unwrap().line_number, 4);
        // One path, interned once.
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_attribute_symbols_and_styleable_entries() {
        let attr = Attribute {
            format_flags: 0x0001_0010,
            min_int: 0,
            max_int: 100,
            symbols: vec![AttributeSymbol {
                name: Reference::named("id/one"),
                value: 1,
                comment: "first".to_string(),
                source: Source::new("res/values/attrs.xml"),
            }],
        };
        let out = encode_value(&Value::new(ValueKind::Attribute(attr)), None);
        let schema::ValueBody::CompoundValue(schema::CompoundValue::Attr(attr)) = out.body else {
            panic!("expected an attribute");
        };
        assert_eq!(attr.format_flags, 0x0001_0010);
        assert_eq!(attr.symbols[0].value, 1);
        assert_eq!(attr.symbols[0].comment, "first");
        assert_eq!(attr.symbols[0].source, None);

        let styleable = Styleable {
            entries: vec![StyleableEntry {
                attr: Reference::named("attr/textColor"),
                comment: String::new(),
                source: Source::default(),
            }],
        };
        let out = encode_value(&Value::new(ValueKind::Styleable(styleable)), None);
        let schema::ValueBody::CompoundValue(schema::CompoundValue::Styleable(styleable)) =
            out.body
        else {
            panic!("expected a styleable");
        };
        assert_eq!(styleable.entries[0].attr.name, "attr/textColor");
    }

    #[test]
    fn test_nested_references_intern_into_pool() {
        let mut array = Array::default();
        let mut element = Item::new(ItemKind::Reference(Reference::named("string/a")));
        element.source = Source::with_line("res/values/arrays.xml", 11);
        array.elements.push(element);

        let mut value = Value::new(ValueKind::Array(array));
        value.source = Source::new("res/values/arrays.xml");

        let mut pool = StringPool::new();
        let out = encode_value(&value, Some(&mut pool));
        let schema::ValueBody::CompoundValue(schema::CompoundValue::Array(array)) = out.body else {
            panic!("expected an array");
        };
        assert_eq!(array.elements[0].source.as_ref().unwrap().position.unwrap().line_number, 11);
        assert_eq!(pool.len(), 1);
    }
}
