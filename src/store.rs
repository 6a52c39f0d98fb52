//! The selection store: single owner of the wizard state.
//!
//! Every mutation goes through a named operation. After each write the store
//! runs [`SelectionStore::sync`], which
//! - writes the persisted fields that changed to the [`KeyValueStore`],
//! - lets the [`HistoryManager`] observe the watched fields,
//!
//! and operations touching the catalog or the filters recompute the filtered
//! catalog right away, so readers never see stale derived data.

use crate::checkout::{line_item, CheckoutError, CheckoutProvider, CheckoutSession, LineItem};
use crate::config::AppConfig;
use crate::constants::*;
use crate::drag::{DragCommit, DragEngine};
use crate::filter::filter_catalog;
use crate::history::{HistoryManager, WatchedFields};
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::types::*;
use std::collections::BTreeMap;

/// The fields mirrored to durable storage.
#[derive(Debug, Clone, PartialEq, Default)]
struct PersistedFields {
    place: Option<Place>,
    background: Option<Background>,
    layout: Option<Layout>,
    variants: BTreeMap<usize, usize>,
    artworks: BTreeMap<FrameIndex, Artwork>,
    frames: BTreeMap<FrameIndex, FrameStyle>,
    cart: CartItems,
    quantities: Quantities,
    step: Step,
    group_offset: Offset,
}

impl PersistedFields {
    fn capture(selection: &Selection) -> Self {
        Self {
            place: selection.selected_place.clone(),
            background: selection.selected_background.clone(),
            layout: selection.selected_layout.clone(),
            variants: selection.active_variants.clone(),
            artworks: selection.selected_artworks.clone(),
            frames: selection.selected_frames.clone(),
            cart: selection.cart_items.clone(),
            quantities: selection.quantities.clone(),
            step: selection.current_step,
            group_offset: selection.group_offset,
        }
    }

    /// Writes every field that differs from `previous`.
    fn write_changes(&self, previous: &PersistedFields, storage: &mut dyn KeyValueStore) {
        if self.place != previous.place {
            save_json(storage, KEY_PLACE, &self.place);
        }
        if self.background != previous.background {
            save_json(storage, KEY_BACKGROUND, &self.background);
        }
        if self.layout != previous.layout {
            save_json(storage, KEY_LAYOUT, &self.layout);
        }
        if self.variants != previous.variants {
            save_json(storage, KEY_VARIANTS, &self.variants);
        }
        if self.artworks != previous.artworks {
            save_json(storage, KEY_ARTWORKS, &self.artworks);
        }
        if self.frames != previous.frames {
            save_json(storage, KEY_FRAMES, &self.frames);
        }
        if self.cart != previous.cart {
            save_json(storage, KEY_CART, &self.cart);
        }
        if self.quantities != previous.quantities {
            save_json(storage, KEY_QUANTITIES, &self.quantities);
        }
        if self.step != previous.step {
            save_json(storage, KEY_STEP, &self.step);
        }
        if self.group_offset != previous.group_offset {
            save_json(storage, KEY_GROUP_OFFSET, &self.group_offset);
        }
    }
}

/// Outcome of [`SelectionStore::request_layout_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChange {
    /// The layout was applied
    Applied,
    /// Assignments would be affected; waiting for [`SelectionStore::confirm_layout_change`]
    NeedsConfirmation,
    /// The layout is already selected
    Unchanged,
}

/// Single source of truth for the wizard.
pub struct SelectionStore {
    selection: Selection,
    storage: Box<dyn KeyValueStore>,
    persisted: PersistedFields,
    history: HistoryManager,
    drag: DragEngine,
    catalog: Vec<Artwork>,
    filtered: Vec<Artwork>,
    pending_layout: Option<Layout>,
    checkout_error: Option<String>,
    checking_out: bool,
    config: AppConfig,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selection", &self.selection)
            .field("catalog_len", &self.catalog.len())
            .field("undo_depth", &self.history.undo_depth())
            .field("redo_depth", &self.history.redo_depth())
            .finish_non_exhaustive()
    }
}

impl SelectionStore {
    /// Builds the store from whatever `storage` holds; missing or malformed
    /// entries fall back to their defaults.
    pub fn load(storage: Box<dyn KeyValueStore>, config: AppConfig) -> Self {
        let config = config.validated();
        let mut selection = Selection {
            selected_place: load_json::<Option<Place>>(storage.as_ref(), KEY_PLACE).flatten(),
            selected_background: load_json::<Option<Background>>(storage.as_ref(), KEY_BACKGROUND).flatten(),
            selected_layout: load_json::<Option<Layout>>(storage.as_ref(), KEY_LAYOUT).flatten(),
            active_variants: load_json(storage.as_ref(), KEY_VARIANTS).unwrap_or_default(),
            selected_artworks: load_json(storage.as_ref(), KEY_ARTWORKS).unwrap_or_default(),
            selected_frames: load_json(storage.as_ref(), KEY_FRAMES).unwrap_or_default(),
            cart_items: load_json(storage.as_ref(), KEY_CART).unwrap_or_default(),
            quantities: load_json(storage.as_ref(), KEY_QUANTITIES).unwrap_or_default(),
            current_step: load_step(storage.as_ref()),
            group_offset: load_json(storage.as_ref(), KEY_GROUP_OFFSET).unwrap_or_default(),
            ..Selection::default()
        };
        drop_orphaned_slots(&mut selection);
        selection.group_offset = crate::drag::clamp_offset(selection.group_offset, &config.drag.boundary);

        let history = HistoryManager::new(WatchedFields::capture(&selection), config.history_depth);
        let persisted = PersistedFields::capture(&selection);
        Self {
            selection,
            storage,
            persisted,
            history,
            drag: DragEngine::new(config.drag),
            catalog: Vec::new(),
            filtered: Vec::new(),
            pending_layout: None,
            checkout_error: None,
            checking_out: false,
            config,
        }
    }

    // ====================================================================
    // Read access
    // ====================================================================

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The full catalog.
    pub fn catalog(&self) -> &[Artwork] {
        &self.catalog
    }

    /// The catalog narrowed by the current filters.
    pub fn filtered_artworks(&self) -> &[Artwork] {
        &self.filtered
    }

    /// Layout waiting for confirmation, if any.
    pub fn pending_layout(&self) -> Option<&Layout> {
        self.pending_layout.as_ref()
    }

    /// Last checkout failure shown to the shopper.
    pub fn checkout_error(&self) -> Option<&str> {
        self.checkout_error.as_deref()
    }

    /// Whether a checkout request is in flight.
    pub fn is_checking_out(&self) -> bool {
        self.checking_out
    }

    /// Returns true if there are changes that can be undone.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are changes that can be redone.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The drag engine, for in-flight state.
    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    // ====================================================================
    // Wizard navigation
    // ====================================================================

    /// Jumps to `step`.
    pub fn go_to_step(&mut self, step: Step) {
        self.selection.current_step = step;
        self.sync();
    }

    /// Advances one step; no-op on the last step.
    pub fn next_step(&mut self) {
        if let Some(step) = self.selection.current_step.next() {
            self.go_to_step(step);
        }
    }

    /// Goes back one step; no-op on the first step.
    pub fn previous_step(&mut self) {
        if let Some(step) = self.selection.current_step.previous() {
            self.go_to_step(step);
        }
    }

    // ====================================================================
    // Room, background, layout
    // ====================================================================

    /// Selects the room.
    pub fn select_place(&mut self, place: Place) {
        self.selection.selected_place = Some(place);
        self.sync();
    }

    /// Selects `background`, the `variant`-th entry of background section `section`.
    pub fn select_background(&mut self, section: usize, variant: usize, background: Background) {
        self.selection.active_variants.insert(section, variant);
        self.selection.selected_background = Some(background);
        self.sync();
    }

    /// Asks to switch to `layout`.
    ///
    /// When artworks or frames are assigned the change is parked until
    /// [`confirm_layout_change`](Self::confirm_layout_change).
    pub fn request_layout_change(&mut self, layout: Layout) -> LayoutChange {
        if self.selection.selected_layout.as_ref().is_some_and(|l| l.id == layout.id) {
            return LayoutChange::Unchanged;
        }
        if self.selection.selected_artworks.is_empty() && self.selection.selected_frames.is_empty() {
            self.apply_layout(layout);
            return LayoutChange::Applied;
        }
        log::debug!("layout change to {} waits for confirmation", layout.id);
        self.pending_layout = Some(layout);
        LayoutChange::NeedsConfirmation
    }

    /// Applies the pending layout. Returns false when nothing was pending.
    pub fn confirm_layout_change(&mut self) -> bool {
        match self.pending_layout.take() {
            Some(layout) => {
                self.apply_layout(layout);
                true
            }
            None => false,
        }
    }

    /// Drops the pending layout.
    pub fn cancel_layout_change(&mut self) {
        self.pending_layout = None;
    }

    fn apply_layout(&mut self, layout: Layout) {
        let slots = layout.frames.len();
        self.selection.selected_artworks.retain(|index, _| *index < slots);
        self.selection.selected_frames.retain(|index, _| *index < slots);
        self.selection.selected_layout = Some(layout);
        self.drag.cancel();
        self.selection.group_offset = Offset::ZERO;
        self.selection.individual_offsets.clear();
        self.sync();
    }

    // ====================================================================
    // Frame assignments
    // ====================================================================

    fn slot_exists(&self, index: FrameIndex) -> bool {
        self.selection
            .selected_layout
            .as_ref()
            .is_some_and(|l| index < l.frames.len())
    }

    /// Puts `artwork` into frame slot `index`. Ignored for slots outside the layout.
    pub fn assign_artwork(&mut self, index: FrameIndex, artwork: Artwork) {
        if !self.slot_exists(index) {
            log::debug!("ignoring artwork for missing slot {index}");
            return;
        }
        self.selection.selected_artworks.insert(index, artwork);
        self.sync();
    }

    /// Empties the artwork of slot `index`.
    pub fn clear_artwork(&mut self, index: FrameIndex) {
        if self.selection.selected_artworks.remove(&index).is_some() {
            self.sync();
        }
    }

    /// Puts frame `style` around slot `index`. Ignored for slots outside the layout.
    pub fn assign_frame(&mut self, index: FrameIndex, style: FrameStyle) {
        if !self.slot_exists(index) {
            log::debug!("ignoring frame style for missing slot {index}");
            return;
        }
        self.selection.selected_frames.insert(index, style);
        self.sync();
    }

    /// Removes the frame style of slot `index`.
    pub fn clear_frame(&mut self, index: FrameIndex) {
        if self.selection.selected_frames.remove(&index).is_some() {
            self.sync();
        }
    }

    // ====================================================================
    // Catalog and filters
    // ====================================================================

    /// Replaces the catalog.
    pub fn set_catalog(&mut self, artworks: Vec<Artwork>) {
        log::info!("catalog loaded with {} artworks", artworks.len());
        self.catalog = artworks;
        self.refresh_filtered();
    }

    /// Sets the free-text search.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.selection.filters.search_query = query.into();
        self.refresh_filtered();
    }

    /// Adds `value` to filter `kind`, or removes it when already selected.
    pub fn toggle_filter(&mut self, kind: FilterKind, value: &str) {
        let values = self.selection.filters.values_mut(kind);
        match values.iter().position(|v| v == value) {
            Some(pos) => {
                values.remove(pos);
            }
            None => values.push(value.to_owned()),
        }
        self.refresh_filtered();
    }

    /// [`toggle_filter`](Self::toggle_filter) by filter name; unknown names are ignored.
    pub fn toggle_filter_named(&mut self, name: &str, value: &str) {
        if let Some(kind) = FilterKind::parse(name) {
            self.toggle_filter(kind, value);
        }
    }

    /// Clears the search and every filter.
    pub fn clear_filters(&mut self) {
        self.selection.filters = Filters::default();
        self.refresh_filtered();
    }

    fn refresh_filtered(&mut self) {
        self.filtered = filter_catalog(&self.catalog, &self.selection.filters)
            .into_iter()
            .cloned()
            .collect();
    }

    // ====================================================================
    // Wall settings
    // ====================================================================

    /// Sets the preferred print orientation.
    pub fn set_print_orientation(&mut self, orientation: PrintOrientation) {
        self.selection.wall.print_orientation = orientation;
        self.sync();
    }

    /// Sets the preferred print style.
    pub fn set_print_style(&mut self, style: Option<String>) {
        self.selection.wall.print_style = style;
        self.sync();
    }

    /// Sets the preferred print size.
    pub fn set_print_size(&mut self, size: Option<String>) {
        self.selection.wall.print_size = size;
        self.sync();
    }

    /// Sets the display unit.
    pub fn set_measurement_unit(&mut self, unit: MeasurementUnit) {
        self.selection.wall.measurement_unit = unit;
        self.sync();
    }

    /// Sets the wall preview zoom, clamped to the supported range.
    pub fn set_wall_scale(&mut self, scale: f32) {
        self.selection.wall.wall_scale = scale.clamp(MIN_WALL_SCALE, MAX_WALL_SCALE);
        self.sync();
    }

    /// Picks a spacing preset; named presets also set the spacing value.
    pub fn set_spacing_preset(&mut self, preset: SpacingPreset) {
        self.selection.wall.spacing_preset = preset;
        if let Some(pixels) = preset.pixels() {
            self.selection.wall.spacing_value = pixels;
        }
        self.sync();
    }

    /// Sets a custom spacing in pixels.
    pub fn set_spacing_value(&mut self, pixels: f32) {
        self.selection.wall.spacing_preset = SpacingPreset::Custom;
        self.selection.wall.spacing_value = pixels.max(0.0);
        self.sync();
    }

    // ====================================================================
    // Positioning
    // ====================================================================

    /// Switches between moving the whole group (locked) and single frames.
    pub fn set_locked(&mut self, locked: bool) {
        self.drag.cancel();
        self.selection.is_locked = locked;
    }

    /// Pointer pressed on the wall in locked mode.
    pub fn begin_group_drag(&mut self, pointer: Offset) {
        self.drag.begin_group(pointer);
    }

    /// Pointer pressed on frame `index` in unlocked mode.
    pub fn begin_frame_drag(&mut self, index: FrameIndex, pointer: Offset) {
        let committed = self
            .selection
            .individual_offsets
            .get(&index)
            .copied()
            .unwrap_or_default();
        self.drag.begin_individual(index, pointer, committed);
    }

    /// Pointer moved while a drag is active.
    pub fn drag_to(&mut self, pointer: Offset) {
        self.drag.update(pointer, self.selection.group_offset);
    }

    /// Pointer released. Returns whether the press moved far enough to count as a drag.
    pub fn end_drag(&mut self) -> bool {
        match self.drag.end(self.selection.group_offset) {
            Some(DragCommit::Group(offset)) => {
                self.selection.group_offset = offset;
                self.sync();
            }
            Some(DragCommit::Individual { index, offset }) => {
                self.selection.individual_offsets.insert(index, offset);
                self.sync();
            }
            None => {}
        }
        self.drag.has_dragged()
    }

    /// Whether the last press turned into a drag.
    pub fn has_dragged(&self) -> bool {
        self.drag.has_dragged()
    }

    /// Moves the group and every frame back to the neutral position.
    pub fn reset_positions(&mut self) {
        self.drag.cancel();
        self.selection.group_offset = Offset::ZERO;
        self.selection.individual_offsets.clear();
        self.sync();
    }

    /// Offset at which frame `index` is drawn, including any drag in flight.
    pub fn frame_offset(&self, index: FrameIndex) -> Offset {
        let group = self.selection.group_offset + self.drag.group_delta();
        if self.selection.is_locked {
            return group;
        }
        let own = match self.drag.individual_preview() {
            Some((dragged, offset)) if dragged == index => offset,
            _ => self
                .selection
                .individual_offsets
                .get(&index)
                .copied()
                .unwrap_or_default(),
        };
        group + own
    }

    // ====================================================================
    // Cart
    // ====================================================================

    /// Opens or closes the cart panel.
    pub fn toggle_cart(&mut self) {
        self.selection.show_cart = !self.selection.show_cart;
    }

    /// Shows or hides the cart panel.
    pub fn set_show_cart(&mut self, show: bool) {
        self.selection.show_cart = show;
    }

    /// Copies the current assignments into the cart and opens it.
    ///
    /// Each artwork is stamped with the frame size of its slot (or its own
    /// size). New lines get quantity one; existing quantities are kept.
    pub fn handle_add_to_cart(&mut self) {
        let frames = self.selection.selected_layout.as_ref().map(|l| l.frames.as_slice());
        let artworks: BTreeMap<FrameIndex, Artwork> = self
            .selection
            .selected_artworks
            .iter()
            .map(|(index, artwork)| {
                let slot_size = frames
                    .and_then(|f| f.get(*index))
                    .map(|f| f.size.clone())
                    .filter(|s| !s.trim().is_empty());
                let mut stamped = artwork.clone();
                stamped.frame_size = slot_size.or_else(|| artwork.size.clone());
                (*index, stamped)
            })
            .collect();

        self.selection.cart_items = CartItems {
            artworks,
            frames: self.selection.selected_frames.clone(),
        };
        let cart = &self.selection.cart_items;
        let quantities = &mut self.selection.quantities;
        for index in cart.artworks.keys() {
            quantities.artworks.entry(*index).or_insert(1);
        }
        for index in cart.frames.keys() {
            quantities.frames.entry(*index).or_insert(1);
        }
        self.selection.show_cart = true;
        self.sync();
    }

    /// Sets the quantity of a cart line (at least one). Ignored for lines not in the cart.
    pub fn set_quantity(&mut self, kind: CartKind, index: FrameIndex, quantity: u32) {
        let in_cart = match kind {
            CartKind::Artwork => self.selection.cart_items.artworks.contains_key(&index),
            CartKind::Frame => self.selection.cart_items.frames.contains_key(&index),
        };
        if !in_cart {
            return;
        }
        self.selection.quantities.map_mut(kind).insert(index, quantity.max(1));
        self.sync();
    }

    /// Removes a line and its quantity from the cart.
    pub fn remove_from_cart(&mut self, kind: CartKind, index: FrameIndex) {
        let removed = match kind {
            CartKind::Artwork => self.selection.cart_items.artworks.remove(&index).is_some(),
            CartKind::Frame => self.selection.cart_items.frames.remove(&index).is_some(),
        };
        if removed {
            self.selection.quantities.map_mut(kind).remove(&index);
            self.sync();
        }
    }

    /// Number of distinct cart lines.
    pub fn cart_line_count(&self) -> usize {
        self.selection.cart_items.artworks.len() + self.selection.cart_items.frames.len()
    }

    /// Number of items in the cart, counting quantities.
    pub fn cart_item_count(&self) -> u32 {
        let cart = &self.selection.cart_items;
        let quantities = &self.selection.quantities;
        cart.artworks
            .keys()
            .map(|i| quantities.get(CartKind::Artwork, *i))
            .chain(cart.frames.keys().map(|i| quantities.get(CartKind::Frame, *i)))
            .sum()
    }

    /// Price of the current assignments, formatted with two decimals.
    pub fn calculate_total_price(&self) -> String {
        format_price(total(
            &self.selection.selected_artworks,
            &self.selection.selected_frames,
            &self.selection.quantities,
        ))
    }

    /// Price of the cart, formatted with two decimals.
    pub fn calculate_cart_total(&self) -> String {
        format_price(total(
            &self.selection.cart_items.artworks,
            &self.selection.cart_items.frames,
            &self.selection.quantities,
        ))
    }

    // ====================================================================
    // Checkout
    // ====================================================================

    /// One line per cart artwork.
    pub fn checkout_lines(&self) -> Result<Vec<LineItem>, CheckoutError> {
        let lines: Vec<LineItem> = self
            .selection
            .cart_items
            .artworks
            .iter()
            .filter_map(|(index, artwork)| {
                line_item(artwork, self.selection.quantities.get(CartKind::Artwork, *index))
            })
            .collect();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(lines)
    }

    /// Validates the cart and marks a checkout as started.
    ///
    /// On failure the error is kept for display and nothing else changes.
    pub fn begin_checkout(&mut self) -> Result<Vec<LineItem>, CheckoutError> {
        match self.checkout_lines() {
            Ok(lines) => {
                log::info!("starting checkout with {} lines", lines.len());
                self.checkout_error = None;
                self.checking_out = true;
                Ok(lines)
            }
            Err(err) => {
                self.checkout_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Records the provider's answer. Returns the URL to redirect to on success.
    ///
    /// The cart is left untouched either way so a failed checkout can be retried.
    pub fn finish_checkout(&mut self, result: Result<CheckoutSession, CheckoutError>) -> Result<String, CheckoutError> {
        self.checking_out = false;
        match result {
            Ok(session) => {
                log::info!("checkout created");
                self.checkout_error = None;
                Ok(session.web_url)
            }
            Err(err) => {
                log::warn!("checkout failed: {err}");
                self.checkout_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Full checkout round trip through `provider`.
    pub async fn handle_checkout(&mut self, provider: &dyn CheckoutProvider) -> Result<String, CheckoutError> {
        let lines = self.begin_checkout()?;
        let result = provider.create_checkout(lines).await;
        self.finish_checkout(result)
    }

    /// Hides the last checkout error.
    pub fn dismiss_checkout_error(&mut self) {
        self.checkout_error = None;
    }

    // ====================================================================
    // History and reset
    // ====================================================================

    /// Undoes the last watched change. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Redoes the last undone change. Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    fn restore(&mut self, snapshot: WatchedFields) {
        self.drag.cancel();
        self.pending_layout = None;
        snapshot.restore_into(&mut self.selection);
        self.sync();
    }

    /// Restores every field to its default and purges the persisted copies.
    ///
    /// The new selection is built completely before it replaces the old one.
    pub fn handle_reset(&mut self) {
        let fresh = Selection::default();
        for key in PERSISTED_KEYS {
            self.storage.remove(key);
        }
        self.persisted = PersistedFields::capture(&fresh);
        self.history.reset(WatchedFields::capture(&fresh));
        self.selection = fresh;
        self.drag.cancel();
        self.pending_layout = None;
        self.checkout_error = None;
        self.checking_out = false;
        self.refresh_filtered();
        log::info!("selection reset");
    }

    /// Propagates a write: persists changed fields and feeds the history.
    fn sync(&mut self) {
        let latest = PersistedFields::capture(&self.selection);
        latest.write_changes(&self.persisted, self.storage.as_mut());
        self.persisted = latest;
        self.history.observe(WatchedFields::capture(&self.selection));
    }
}

/// Reads the saved step. Accepts JSON strings and bare legacy values; anything
/// unrecognized starts the wizard over.
fn load_step(storage: &dyn KeyValueStore) -> Step {
    let Some(raw) = storage.get(KEY_STEP) else {
        return Step::default();
    };
    serde_json::from_str::<Step>(&raw)
        .or_else(|_| serde_json::from_value::<Step>(serde_json::Value::String(raw.trim().to_owned())))
        .unwrap_or_else(|err| {
            log::warn!("discarding saved step {raw:?}: {err}");
            Step::default()
        })
}

/// Removes assignments that point outside the selected layout.
fn drop_orphaned_slots(selection: &mut Selection) {
    let slots = selection.selected_layout.as_ref().map_or(0, |l| l.frames.len());
    let before = selection.selected_artworks.len() + selection.selected_frames.len();
    selection.selected_artworks.retain(|index, _| *index < slots);
    selection.selected_frames.retain(|index, _| *index < slots);
    let dropped = before - selection.selected_artworks.len() - selection.selected_frames.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} saved assignments outside the layout");
    }
}

fn total(
    artworks: &BTreeMap<FrameIndex, Artwork>,
    frames: &BTreeMap<FrameIndex, FrameStyle>,
    quantities: &Quantities,
) -> f64 {
    let artworks: f64 = artworks
        .iter()
        .map(|(i, a)| a.price_value() * f64::from(quantities.get(CartKind::Artwork, *i)))
        .sum();
    let frames: f64 = frames
        .iter()
        .map(|(i, f)| f.price_value() * f64::from(quantities.get(CartKind::Frame, *i)))
        .sum();
    artworks + frames
}

/// Formats a price with two decimals.
pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}
