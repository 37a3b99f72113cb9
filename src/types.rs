//! Core model types for respack.
//! A compiler front end builds these; the encoders serialize them.
//!
//! The value model is a closed set: [`ValueKind`] and [`ItemKind`] enumerate
//! every variant the format knows about. Encoders match exhaustively over
//! them, so adding a variant forces every encoder to take a position at
//! compile time.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDescription;

/// Where an entity came from, for diagnostics.
///
/// In wire form the path is stored as an index into the encoding session's
/// string pool; `line` is 1-based when present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    pub path: String,
    pub line: Option<u32>,
}

impl Source {
    pub fn new(path: impl Into<String>) -> Self {
        Source {
            path: path.into(),
            line: None,
        }
    }

    pub fn with_line(path: impl Into<String>, line: u32) -> Self {
        Source {
            path: path.into(),
            line: Some(line),
        }
    }
}

/// A finalized numeric resource ID (`0xPPTTEEEE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ResourceId(pub u32);

/// Whether a reference points at a resource or at an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceType {
    #[default]
    Resource,
    Attribute,
}

/// A reference to another resource, by ID, name, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reference {
    pub id: Option<ResourceId>,
    /// Fully qualified name, e.g. `com.example:string/app_name`.
    pub name: Option<String>,
    pub private: bool,
    pub reference_type: ReferenceType,
}

impl Reference {
    pub fn new(id: ResourceId) -> Self {
        Reference {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Reference {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A styling span over a [`StyledString`], character offsets inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub tag: String,
    pub first_char: u32,
    pub last_char: u32,
}

/// Text with inline markup flattened into spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledString {
    pub value: String,
    pub spans: Vec<Span>,
}

/// A typed primitive already flattened by the platform: a type tag plus a
/// 32-bit payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub data_type: u8,
    pub data: u32,
}

impl Primitive {
    /// The platform typed-value pair this primitive flattens to.
    pub fn flatten(&self) -> (u8, u32) {
        (self.data_type, self.data)
    }
}

/// The closed set of scalar item variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Reference(Reference),
    String(String),
    RawString(String),
    StyledString(StyledString),
    FileReference(String),
    Id,
    Primitive(Primitive),
}

/// A scalar item together with its diagnostic metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub comment: String,
    pub source: Source,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Item {
            kind,
            comment: String::new(),
            source: Source::default(),
        }
    }
}

/// One symbol of an [`Attribute`]'s symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSymbol {
    pub name: Reference,
    pub value: u32,
    pub comment: String,
    pub source: Source,
}

/// An `<attr>` definition: accepted formats, integer bounds, and symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub format_flags: u32,
    pub min_int: i32,
    pub max_int: i32,
    pub symbols: Vec<AttributeSymbol>,
}

/// A style's parent reference, carrying its own source separately from the
/// style entry sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleParent {
    pub reference: Reference,
    pub source: Source,
}

/// One keyed entry of a [`Style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub key: Reference,
    pub comment: String,
    pub source: Source,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub parent: Option<StyleParent>,
    pub entries: Vec<StyleEntry>,
}

/// One attribute reference of a [`Styleable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleableEntry {
    pub attr: Reference,
    pub comment: String,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Styleable {
    pub entries: Vec<StyleableEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array {
    pub elements: Vec<Item>,
}

/// Grammatical plural category used to select pluralized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Arity {
    /// All arities in slot order.
    pub const ALL: [Arity; 6] = [
        Arity::Zero,
        Arity::One,
        Arity::Two,
        Arity::Few,
        Arity::Many,
        Arity::Other,
    ];

    /// The slot index of this arity in a [`Plural`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Arity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ZERO" => Ok(Arity::Zero),
            "ONE" => Ok(Arity::One),
            "TWO" => Ok(Arity::Two),
            "FEW" => Ok(Arity::Few),
            "MANY" => Ok(Arity::Many),
            "OTHER" => Ok(Arity::Other),
            _ => Err(format!("Unknown plural arity: {}", s)),
        }
    }
}

/// Pluralized values, one optional slot per arity. Unpopulated slots are
/// never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plural {
    pub values: [Option<Item>; 6],
}

impl Plural {
    pub fn set(&mut self, arity: Arity, item: Item) {
        self.values[arity.index()] = Some(item);
    }

    pub fn get(&self, arity: Arity) -> Option<&Item> {
        self.values[arity.index()].as_ref()
    }
}

/// The closed set of value variants: scalar items plus compound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Item(ItemKind),
    Attribute(Attribute),
    Style(Style),
    Styleable(Styleable),
    Array(Array),
    Plural(Plural),
}

/// A resource value together with the metadata every variant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub kind: ValueKind,
    pub comment: String,
    /// Weak values may be overridden during linking.
    pub weak: bool,
    pub source: Source,
}

impl Value {
    pub fn new(kind: ValueKind) -> Self {
        Value {
            kind,
            comment: String::new(),
            weak: false,
            source: Source::default(),
        }
    }

    pub fn item(kind: ItemKind) -> Self {
        Value::new(ValueKind::Item(kind))
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }
}

/// Visibility of an entry's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Undefined,
    Private,
    Public,
}

/// Symbol visibility and provenance for one entry. Always emitted, even when
/// the entry never declared one (defaults apply).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolStatus {
    pub visibility: Visibility,
    pub source: Source,
    pub comment: String,
    pub allow_new: bool,
}

/// One value of an entry under a specific configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    pub config: ConfigDescription,
    /// Product variant this value belongs to, empty for the default product.
    pub product: String,
    pub value: Value,
}

/// A named entry owning one value per configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry part of the resource ID, assigned once resources are finalized.
    pub id: Option<u16>,
    pub name: String,
    pub symbol_status: SymbolStatus,
    pub values: Vec<ConfigValue>,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Entry {
            id: None,
            name: name.into(),
            symbol_status: SymbolStatus::default(),
            values: Vec::new(),
        }
    }
}

/// A resource type (`string`, `layout`, `attr`, …) owning its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    pub id: Option<u8>,
    pub name: String,
    pub entries: Vec<Entry>,
}

impl ResourceType {
    pub fn new(name: impl Into<String>) -> Self {
        ResourceType {
            id: None,
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// A package owning its resource types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub id: Option<u8>,
    pub name: String,
    pub types: Vec<ResourceType>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Package {
            id: None,
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn find_type(&self, name: &str) -> Option<&ResourceType> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// The root of the 4-level ownership tree. Walk order is stored insertion
/// order throughout, never sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceTable {
    pub packages: Vec<Package>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// An exported symbol of a compiled file, with the line it was declared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedResourceName {
    pub name: String,
    pub line: u32,
}

/// One compiled resource file: the unit the container format frames as a
/// metadata record plus a raw data record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Fully qualified resource name, e.g. `com.example:layout/main`.
    pub name: String,
    pub source: Source,
    pub config: ConfigDescription,
    pub exported_symbols: Vec<SourcedResourceName>,
}
