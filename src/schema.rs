//! Output schema records for the compiled resource container.
//!
//! These are the wire-side mirror of the model in [`crate::types`]: plain
//! serde records, serialized by the structured-message layer (`rmp-serde`,
//! named-field mode) into the self-describing record bytes the container
//! frames. A field that is absent here decodes to its default on the other
//! side; the encoders rely on that for every "unset means any" qualifier.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Error;
pub use crate::types::Arity;

/// A record that can be serialized into container bytes.
///
/// Mirrors how the decoder side consumes them: one record, one contiguous
/// byte run, no internal framing.
pub trait Record: Serialize {
    /// Serializes this record into its wire bytes.
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        rmp_serde::to_vec_named(self).map_err(Error::Encode)
    }

    /// Serializes this record into any writer.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes).map_err(Error::Io)
    }
}

impl Record for Configuration {}
impl Record for Value {}
impl Record for Item {}
impl Record for ResourceTable {}
impl Record for CompiledFile {}
impl Record for XmlNode {}

// --- Qualifier enumerations -------------------------------------------------
//
// Each closed set below corresponds to one independently-masked field of the
// configuration descriptor. "Unset" is expressed by the surrounding Option,
// never by an extra variant.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenLayoutSize {
    Small,
    Normal,
    Large,
    Xlarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenLayoutLong {
    Long,
    Notlong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenRound {
    Round,
    Notround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WideColorGamut {
    Widecg,
    Nowidecg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hdr {
    Highdr,
    Lowdr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Port,
    Land,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiModeType {
    Normal,
    Desk,
    Car,
    Television,
    Appliance,
    Watch,
    Vrheadset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiModeNight {
    Night,
    Notnight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Touchscreen {
    Notouch,
    Stylus,
    Finger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeysHidden {
    Keysexposed,
    Keyshidden,
    Keyssoft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyboard {
    Nokeys,
    Qwerty,
    Twelvekey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavHidden {
    Navexposed,
    Navhidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    Nonav,
    Dpad,
    Trackball,
    Wheel,
}

/// The wire form of a configuration descriptor. Masked qualifier fields are
/// `Option`s and stay absent unless their bits matched a known constant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Configuration {
    pub mcc: u32,
    pub mnc: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub locale: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_direction: Option<LayoutDirection>,
    pub screen_width: u32,
    pub screen_height: u32,
    pub screen_width_dp: u32,
    pub screen_height_dp: u32,
    pub smallest_screen_width_dp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_layout_size: Option<ScreenLayoutSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_layout_long: Option<ScreenLayoutLong>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_round: Option<ScreenRound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wide_color_gamut: Option<WideColorGamut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr: Option<Hdr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_mode_type: Option<UiModeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_mode_night: Option<UiModeNight>,
    pub density: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touchscreen: Option<Touchscreen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys_hidden: Option<KeysHidden>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Keyboard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_hidden: Option<NavHidden>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
    pub sdk_version: u32,

    /// Product variant, carried alongside the qualifiers in table output.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product: String,
}

// --- Sources ----------------------------------------------------------------

/// A line/column position. Zero means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SourcePosition {
    pub line_number: u32,
    pub column_number: u32,
}

/// A source whose path has been interned into the session string pool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SourceRef {
    pub path_idx: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
}

// --- Values -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    Reference,
    Attribute,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reference {
    pub id: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub private: bool,
    #[serde(rename = "type")]
    pub reference_type: ReferenceType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Span {
    pub tag: String,
    pub first_char: u32,
    pub last_char: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Primitive {
    #[serde(rename = "type")]
    pub data_type: u32,
    pub data: u32,
}

/// The wire form of a scalar item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Ref(Reference),
    Str {
        value: String,
    },
    RawStr {
        value: String,
    },
    StyledStr {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        spans: Vec<Span>,
    },
    File {
        path: String,
    },
    Id,
    Prim(Primitive),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttributeSymbol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub name: Reference,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attribute {
    pub format_flags: u32,
    pub min_int: i32,
    pub max_int: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<AttributeSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StyleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub key: Reference,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,
    /// Source of the parent reference, recorded separately from the entry
    /// sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_source: Option<SourceRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<StyleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StyleableEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub attr: Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Styleable {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<StyleableEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArrayElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Array {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ArrayElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluralEntry {
    pub arity: Arity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub item: Item,
}

/// Sparse plural record: one entry per populated arity slot, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Plural {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<PluralEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundValue {
    Attr(Attribute),
    Style(Style),
    Styleable(Styleable),
    Array(Array),
    Plural(Plural),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBody {
    Item(Item),
    CompoundValue(CompoundValue),
}

/// The wire form of a value: its body plus the metadata every variant
/// carries. `source` is present only when the value was encoded against a
/// string pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Value {
    pub body: ValueBody,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub weak: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
}

// --- Resource table ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Unknown,
    Private,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SymbolStatus {
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub allow_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigValue {
    pub config: Configuration,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<u32>,
    pub name: String,
    pub symbol_status: SymbolStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config_values: Vec<ConfigValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Type {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Package {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<u32>,
    pub package_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<Type>,
}

/// The wire form of a whole resource table. `source_pool` is the flattened
/// string pool blob, opaque to this schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ResourceTable {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<Package>,
    pub source_pool: Vec<u8>,
}

// --- Compiled files ---------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompiledFileSymbol {
    pub resource_name: String,
    pub source: SourcePosition,
}

/// File-level metadata record: the first of the two framed records of a
/// compiled-file unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CompiledFile {
    pub resource_name: String,
    pub source_path: String,
    pub config: Configuration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exported_symbols: Vec<CompiledFileSymbol>,
}

// --- XML --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct XmlNamespace {
    pub prefix: String,
    pub uri: String,
    pub source: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct XmlAttribute {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace_uri: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiled_item: Option<Item>,
    /// Line-only position of the compiled value, present only with it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourcePosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct XmlElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace_uri: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespace_declarations: Vec<XmlNamespace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<XmlAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XmlNodeKind {
    Element(XmlElement),
    Text(String),
}

/// One node of the encoded XML tree, with its source position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct XmlNode {
    pub source: SourcePosition,
    pub node: XmlNodeKind,
}
