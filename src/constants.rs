//! Shared application-wide constants.
//! Centralizes tweakable defaults used by the store, the drag engine and the UI shell.

// Drag boundary (pixels from the neutral position)
/// Default distance a frame group may travel to the left.
pub const BOUNDARY_LEFT: f32 = 250.0;
/// Default distance a frame group may travel to the right.
pub const BOUNDARY_RIGHT: f32 = 250.0;
/// Default distance a frame group may travel upwards.
pub const BOUNDARY_TOP: f32 = 50.0;
/// Default distance a frame group may travel downwards.
pub const BOUNDARY_BOTTOM: f32 = 200.0;
/// Fraction of the overshoot kept while dragging past the boundary.
pub const ELASTIC_RESISTANCE: f32 = 0.3;

// Drag vs click
/// Movement (in pixels) after which a group press counts as a drag.
pub const GROUP_DRAG_THRESHOLD: f32 = 5.0;
/// Movement (in pixels) after which an individual frame press counts as a drag.
pub const INDIVIDUAL_DRAG_THRESHOLD: f32 = 3.0;

// Undo/redo
/// Maximum number of undo history entries to retain.
pub const MAX_UNDO_HISTORY: usize = 50;

// Catalog rendering
/// Number of catalog cards revealed per chunk.
pub const REVEAL_CHUNK: usize = 80;
/// Minimum delay between two reveals, in milliseconds.
pub const REVEAL_DEBOUNCE_MS: u64 = 200;

// Viewport
/// Viewport width (logical points) below which the shell uses the mobile layout.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

// Wall settings
/// Smallest allowed wall scale.
pub const MIN_WALL_SCALE: f32 = 0.5;
/// Largest allowed wall scale.
pub const MAX_WALL_SCALE: f32 = 2.0;

// Persisted keys
/// Storage key for the selected place.
pub const KEY_PLACE: &str = "selectedPlace";
/// Storage key for the selected background.
pub const KEY_BACKGROUND: &str = "selectedBackground";
/// Storage key for the selected layout.
pub const KEY_LAYOUT: &str = "selectedLayout";
/// Storage key for the chosen background variant per section.
pub const KEY_VARIANTS: &str = "activeVariants";
/// Storage key for per-frame artwork assignments.
pub const KEY_ARTWORKS: &str = "selectedArtworks";
/// Storage key for per-frame frame style assignments.
pub const KEY_FRAMES: &str = "selectedFrames";
/// Storage key for the cart contents.
pub const KEY_CART: &str = "cartItems";
/// Storage key for cart quantities.
pub const KEY_QUANTITIES: &str = "quantities";
/// Storage key for the current wizard step.
pub const KEY_STEP: &str = "currentStep";
/// Storage key for the committed group offset.
pub const KEY_GROUP_OFFSET: &str = "groupOffset";

/// Every key written by the selection store, in write order.
pub const PERSISTED_KEYS: [&str; 10] = [
    KEY_PLACE,
    KEY_BACKGROUND,
    KEY_LAYOUT,
    KEY_VARIANTS,
    KEY_ARTWORKS,
    KEY_FRAMES,
    KEY_CART,
    KEY_QUANTITIES,
    KEY_STEP,
    KEY_GROUP_OFFSET,
];

/// Cart line attribute carrying the human readable frame size.
pub const FRAME_SIZE_ATTRIBUTE: &str = "Frame size";

// Application identity
/// Window title.
pub const APP_NAME: &str = "Gallery Wall";
/// Identifier used for the per-user storage directory.
pub const APP_ID: &str = "gallery-wall";
