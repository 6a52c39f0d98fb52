//! Core data types and structures for the gallery wall configurator.
//!
//! This module defines the records the wizard works with (places, backgrounds,
//! layouts, artworks, frame styles), the cart structures and the complete
//! [`Selection`] that the store owns.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Index of a frame slot within the selected layout.
pub type FrameIndex = usize;

/// The wizard step currently shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Pick a room and a wall background
    #[default]
    #[serde(alias = "intro")]
    Step1,
    /// Pick a layout
    Step2,
    /// Assign artworks and frames, arrange them on the wall
    Step3,
    /// Review the cart and check out
    Checkout,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Step; 4] = [Step::Step1, Step::Step2, Step::Step3, Step::Checkout];

    /// The step after this one, if any.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Step1 => Some(Step::Step2),
            Step::Step2 => Some(Step::Step3),
            Step::Step3 => Some(Step::Checkout),
            Step::Checkout => None,
        }
    }

    /// The step before this one, if any.
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Step1 => None,
            Step::Step2 => Some(Step::Step1),
            Step::Step3 => Some(Step::Step2),
            Step::Checkout => Some(Step::Step3),
        }
    }

    /// Short label shown in the step bar.
    pub fn label(self) -> &'static str {
        match self {
            Step::Step1 => "1. Room",
            Step::Step2 => "2. Layout",
            Step::Step3 => "3. Artworks",
            Step::Checkout => "Checkout",
        }
    }
}

/// A room the wall lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Dominant color as a `#rrggbb` string
    pub color: String,
    /// Optional image reference
    #[serde(default)]
    pub image: Option<String>,
}

/// A wall background (paint or material).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Wall color as a `#rrggbb` string
    pub color: String,
    /// Optional image reference
    #[serde(default)]
    pub image: Option<String>,
    /// Name of the section (variant group) this background belongs to
    #[serde(default)]
    pub section: Option<String>,
}

/// A named group of background variants.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundSection {
    /// Section title, e.g. "Paint"
    pub name: String,
    /// Selectable variants within the section
    pub variants: Vec<Background>,
}

/// A percentage value, serialized the CSS way (`"12.5%"`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percent(pub f32);

impl Percent {
    /// Resolves the percentage against a length in pixels.
    pub fn of(self, length: f32) -> f32 {
        self.0 / 100.0 * length
    }
}

impl TryFrom<String> for Percent {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        number
            .parse::<f32>()
            .map(Percent)
            .map_err(|_| format!("invalid percentage: {value:?}"))
    }
}

impl From<Percent> for String {
    fn from(value: Percent) -> Self {
        format!("{}%", value.0)
    }
}

/// Where a frame is pinned inside the wall area.
///
/// Exactly one vertical and one horizontal edge is used, or the center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Anchor {
    /// Offsets from the top and left edges
    TopLeft { top: Percent, left: Percent },
    /// Offsets from the top and right edges
    TopRight { top: Percent, right: Percent },
    /// Offsets from the bottom and left edges
    BottomLeft { bottom: Percent, left: Percent },
    /// Offsets from the bottom and right edges
    BottomRight { bottom: Percent, right: Percent },
    /// Position of the frame center
    Center { x: Percent, y: Percent },
}

/// Absolute rectangle of a frame in pixels, relative to the wall area origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl FrameRect {
    /// Returns the rectangle moved by `offset`.
    pub fn translate(self, offset: Offset) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }

    /// Whether the point lies inside the rectangle (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A placeholder slot in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Width relative to the wall area
    pub width: Percent,
    /// Height relative to the wall area
    pub height: Percent,
    /// Print size printed on the product, e.g. "50x70"
    pub size: String,
    /// Placement of the frame
    pub anchor: Anchor,
    /// Extra CSS-style transform carried with the layout table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl Frame {
    /// Resolves the frame placement into an absolute rectangle inside a
    /// container of `width` x `height` pixels.
    pub fn rect(&self, width: f32, height: f32) -> FrameRect {
        let w = self.width.of(width);
        let h = self.height.of(height);
        let (x, y) = match self.anchor {
            Anchor::TopLeft { top, left } => (left.of(width), top.of(height)),
            Anchor::TopRight { top, right } => (width - right.of(width) - w, top.of(height)),
            Anchor::BottomLeft { bottom, left } => (left.of(width), height - bottom.of(height) - h),
            Anchor::BottomRight { bottom, right } => {
                (width - right.of(width) - w, height - bottom.of(height) - h)
            }
            Anchor::Center { x, y } => (x.of(width) - w / 2.0, y.of(height) - h / 2.0),
        };
        FrameRect {
            x,
            y,
            width: w,
            height: h,
        }
    }
}

/// A named arrangement of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of frames in the layout
    pub frame_count: usize,
    /// Frame slots, indexed by [`FrameIndex`]
    pub frames: Vec<Frame>,
}

/// A purchasable SKU-level option of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Commerce identifier of the variant
    pub id: String,
    /// Variant title, usually the print size
    #[serde(default)]
    pub title: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artwork {
    /// Stable identifier
    pub id: String,
    /// Product title
    pub title: String,
    /// Unit price as delivered by the catalog; strings and numbers are accepted
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Option<String>,
    /// Free-form category
    pub category: String,
    /// Search and filter tags
    pub tags: Vec<String>,
    /// Colors present in the artwork
    pub colors: Vec<String>,
    /// Print sizes the product is sold in
    pub sizes: Vec<String>,
    /// Style terms
    pub styles: Vec<String>,
    /// Rooms the artwork is curated for
    pub rooms: Vec<String>,
    /// Artist names
    pub artists: Vec<String>,
    /// Product type, used as the collection
    pub product_type: Option<String>,
    /// Vendor name
    pub vendor: Option<String>,
    /// Purchasable variants
    pub variants: Vec<Variant>,
    /// Commerce product identifier
    pub shopify_product_id: Option<String>,
    /// Image reference
    pub image: Option<String>,
    /// Default print size of the artwork
    pub size: Option<String>,
    /// Frame size resolved when the artwork was added to the cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_size: Option<String>,
}

impl Artwork {
    /// Numeric unit price; missing or unparsable prices count as zero.
    pub fn price_value(&self) -> f64 {
        parse_price(self.price.as_deref())
    }
}

/// A frame style (moulding) that can be put around a print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Frame color as a `#rrggbb` string
    pub color: String,
    /// Unit price
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<String>,
}

impl FrameStyle {
    /// Numeric unit price; missing or unparsable prices count as zero.
    pub fn price_value(&self) -> f64 {
        parse_price(self.price.as_deref())
    }
}

fn parse_price(price: Option<&str>) -> f64 {
    price
        .and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Pixel translation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal component
    pub x: f32,
    /// Vertical component (positive is down)
    pub y: f32,
}

impl Offset {
    /// The neutral position.
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    /// Creates a new offset.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The two kinds of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartKind {
    /// A print
    Artwork,
    /// A frame style
    Frame,
}

/// Cart contents keyed by frame slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItems {
    /// Prints with their resolved frame size
    pub artworks: BTreeMap<FrameIndex, Artwork>,
    /// Frame styles
    pub frames: BTreeMap<FrameIndex, FrameStyle>,
}

impl CartItems {
    /// Whether the cart holds no lines at all.
    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty() && self.frames.is_empty()
    }
}

/// Per-line quantities, created lazily when a line enters the cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quantities {
    /// Quantities of print lines
    pub artworks: BTreeMap<FrameIndex, u32>,
    /// Quantities of frame lines
    pub frames: BTreeMap<FrameIndex, u32>,
}

impl Quantities {
    /// Quantity of a line, defaulting to one.
    pub fn get(&self, kind: CartKind, index: FrameIndex) -> u32 {
        let map = match kind {
            CartKind::Artwork => &self.artworks,
            CartKind::Frame => &self.frames,
        };
        map.get(&index).copied().unwrap_or(1).max(1)
    }

    pub(crate) fn map_mut(&mut self, kind: CartKind) -> &mut BTreeMap<FrameIndex, u32> {
        match kind {
            CartKind::Artwork => &mut self.artworks,
            CartKind::Frame => &mut self.frames,
        }
    }
}

/// The categorical catalog filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Print size
    Size,
    /// Color
    Color,
    /// Orientation
    Orientation,
    /// Style
    Style,
    /// Collection (product type)
    Collection,
    /// Artist
    Artist,
    /// Room
    Room,
}

impl FilterKind {
    /// All filter kinds in pipeline order.
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Size,
        FilterKind::Color,
        FilterKind::Orientation,
        FilterKind::Style,
        FilterKind::Collection,
        FilterKind::Artist,
        FilterKind::Room,
    ];

    /// Parses a filter name as used by the UI (`"color"`, `"room"`, ...).
    pub fn parse(name: &str) -> Option<FilterKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "size" => Some(FilterKind::Size),
            "color" => Some(FilterKind::Color),
            "orientation" => Some(FilterKind::Orientation),
            "style" => Some(FilterKind::Style),
            "collection" => Some(FilterKind::Collection),
            "artist" => Some(FilterKind::Artist),
            "room" => Some(FilterKind::Room),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Size => "Size",
            FilterKind::Color => "Color",
            FilterKind::Orientation => "Orientation",
            FilterKind::Style => "Style",
            FilterKind::Collection => "Collection",
            FilterKind::Artist => "Artist",
            FilterKind::Room => "Room",
        }
    }
}

/// Search query plus the selected values of every categorical filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filters {
    /// Free-text search
    pub search_query: String,
    /// Selected sizes
    pub size: Vec<String>,
    /// Selected colors
    pub color: Vec<String>,
    /// Selected orientations
    pub orientation: Vec<String>,
    /// Selected styles
    pub style: Vec<String>,
    /// Selected collections
    pub collection: Vec<String>,
    /// Selected artists
    pub artist: Vec<String>,
    /// Selected rooms
    pub room: Vec<String>,
}

impl Filters {
    /// Selected values of one filter.
    pub fn values(&self, kind: FilterKind) -> &[String] {
        match kind {
            FilterKind::Size => &self.size,
            FilterKind::Color => &self.color,
            FilterKind::Orientation => &self.orientation,
            FilterKind::Style => &self.style,
            FilterKind::Collection => &self.collection,
            FilterKind::Artist => &self.artist,
            FilterKind::Room => &self.room,
        }
    }

    /// Mutable access to the selected values of one filter.
    pub fn values_mut(&mut self, kind: FilterKind) -> &mut Vec<String> {
        match kind {
            FilterKind::Size => &mut self.size,
            FilterKind::Color => &mut self.color,
            FilterKind::Orientation => &mut self.orientation,
            FilterKind::Style => &mut self.style,
            FilterKind::Collection => &mut self.collection,
            FilterKind::Artist => &mut self.artist,
            FilterKind::Room => &mut self.room,
        }
    }

    /// Number of selected categorical values across all filters.
    pub fn active_count(&self) -> usize {
        FilterKind::ALL.iter().map(|k| self.values(*k).len()).sum()
    }
}

/// Print orientation preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintOrientation {
    /// Taller than wide
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
    /// Square
    Square,
}

/// Unit used to display sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementUnit {
    /// Centimeters
    #[default]
    Cm,
    /// Inches
    Inch,
}

/// Named spacing between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacingPreset {
    /// Frames close together
    Tight,
    /// Default spacing
    #[default]
    Normal,
    /// Frames far apart
    Wide,
    /// User-entered spacing
    Custom,
}

impl SpacingPreset {
    /// Spacing in pixels for the named presets; `None` for [`SpacingPreset::Custom`].
    pub fn pixels(self) -> Option<f32> {
        match self {
            SpacingPreset::Tight => Some(8.0),
            SpacingPreset::Normal => Some(16.0),
            SpacingPreset::Wide => Some(32.0),
            SpacingPreset::Custom => None,
        }
    }
}

/// Wall-level print settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSettings {
    /// Preferred print orientation
    pub print_orientation: PrintOrientation,
    /// Preferred print style
    pub print_style: Option<String>,
    /// Preferred print size
    pub print_size: Option<String>,
    /// Display unit
    pub measurement_unit: MeasurementUnit,
    /// Zoom of the wall preview
    pub wall_scale: f32,
    /// Spacing preset
    pub spacing_preset: SpacingPreset,
    /// Spacing in pixels
    pub spacing_value: f32,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            print_orientation: PrintOrientation::default(),
            print_style: None,
            print_size: None,
            measurement_unit: MeasurementUnit::default(),
            wall_scale: 1.0,
            spacing_preset: SpacingPreset::Normal,
            spacing_value: SpacingPreset::Normal.pixels().unwrap_or_default(),
        }
    }
}

/// The complete in-progress configuration of the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Active wizard step
    pub current_step: Step,
    /// Selected room
    pub selected_place: Option<Place>,
    /// Selected wall background
    pub selected_background: Option<Background>,
    /// Chosen background variant per section
    pub active_variants: BTreeMap<usize, usize>,
    /// Selected layout
    pub selected_layout: Option<Layout>,
    /// Artwork per frame slot
    pub selected_artworks: BTreeMap<FrameIndex, Artwork>,
    /// Frame style per frame slot
    pub selected_frames: BTreeMap<FrameIndex, FrameStyle>,
    /// Cart contents
    pub cart_items: CartItems,
    /// Cart quantities
    pub quantities: Quantities,
    /// Catalog filters
    pub filters: Filters,
    /// Committed translation of the whole frame group
    pub group_offset: Offset,
    /// Committed translation of individual frames (unlocked mode)
    pub individual_offsets: BTreeMap<FrameIndex, Offset>,
    /// Wall-level print settings
    pub wall: WallSettings,
    /// Whether frames move as a group
    pub is_locked: bool,
    /// Whether the cart panel is open
    pub show_cart: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            current_step: Step::Step1,
            selected_place: None,
            selected_background: None,
            active_variants: BTreeMap::new(),
            selected_layout: None,
            selected_artworks: BTreeMap::new(),
            selected_frames: BTreeMap::new(),
            cart_items: CartItems::default(),
            quantities: Quantities::default(),
            filters: Filters::default(),
            group_offset: Offset::ZERO,
            individual_offsets: BTreeMap::new(),
            wall: WallSettings::default(),
            is_locked: true,
            show_cart: false,
        }
    }
}
