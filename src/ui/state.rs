//! Application state structures.
//!
//! [`GalleryApp`] owns the [`SelectionStore`] plus the state that only matters
//! to the shell: the slot being edited, the pointer press on the wall, the
//! catalog reveal window and the channel that async jobs report back on.

use crate::catalog::{CatalogError, CatalogProvider};
use crate::checkout::{CheckoutError, CheckoutProvider, CheckoutSession};
use crate::config::AppConfig;
use crate::store::SelectionStore;
use crate::types::*;
use crate::viewport::DeviceProfile;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Grows the visible part of a long catalog in chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealState {
    visible: usize,
    last_reveal: Option<f64>,
    chunk: usize,
    debounce_secs: f64,
}

impl RevealState {
    /// Creates a reveal window growing by `chunk` cards, at most once per `debounce_ms`.
    pub fn new(chunk: usize, debounce_ms: u64) -> Self {
        Self {
            visible: 0,
            last_reveal: None,
            chunk: chunk.max(1),
            debounce_secs: debounce_ms as f64 / 1000.0,
        }
    }

    /// Starts over with the first chunk of a list of `total` cards.
    pub fn reset(&mut self, total: usize) {
        self.visible = self.chunk.min(total);
        self.last_reveal = None;
    }

    /// Reveals the next chunk at time `now` (seconds). Returns whether anything changed.
    pub fn reveal_more(&mut self, now: f64, total: usize) -> bool {
        if self.visible >= total {
            return false;
        }
        if let Some(last) = self.last_reveal {
            if now - last < self.debounce_secs {
                return false;
            }
        }
        self.visible = (self.visible + self.chunk).min(total);
        self.last_reveal = Some(now);
        true
    }

    /// Number of cards to render.
    pub fn visible(&self) -> usize {
        self.visible
    }
}

/// Messages sent from async jobs back to the app.
#[derive(Debug)]
pub enum JobResult {
    /// The catalog provider answered
    CatalogLoaded(Result<Vec<Artwork>, CatalogError>),
    /// The checkout provider answered
    CheckoutFinished(Result<CheckoutSession, CheckoutError>),
}

/// Loading state of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// Fetch in flight
    #[default]
    Loading,
    /// Catalog available
    Ready,
    /// Fetch failed; the message is shown in the panel
    Failed(String),
}

/// A primary-button press on the wall that has not been released yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPress {
    /// Frame under the pointer when the press started
    pub frame: Option<FrameIndex>,
}

/// Shell preferences kept in eframe storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Remembered width of the catalog panel
    pub side_panel_width: f32,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            dark_mode: false,
            side_panel_width: 340.0,
        }
    }
}

/// The main application structure.
pub struct GalleryApp {
    /// Wizard state
    pub store: SelectionStore,
    /// Shell preferences
    pub prefs: UiPrefs,
    /// Frame slot that receives artworks and frame styles picked in step 3
    pub active_slot: Option<FrameIndex>,
    /// Press on the wall waiting for its release
    pub press: Option<WallPress>,
    /// Catalog reveal window
    pub reveal: RevealState,
    /// Catalog loading state
    pub catalog_status: CatalogStatus,
    /// Current viewport classification
    pub device: DeviceProfile,
    /// Whether the reset confirmation is open
    pub show_reset_confirm: bool,
    /// Last checkout URL handed to the browser
    pub last_checkout_url: Option<String>,
    /// Wall area drawn in the last frame
    pub(crate) wall_rect: Option<egui::Rect>,
    pub(crate) catalog: Box<dyn CatalogProvider>,
    pub(crate) checkout: Box<dyn CheckoutProvider>,
    pub(crate) job_sender: Sender<JobResult>,
    pub(crate) job_receiver: Receiver<JobResult>,
}

impl GalleryApp {
    /// Wires the app around a loaded store and its collaborators.
    pub fn new(
        store: SelectionStore,
        catalog: Box<dyn CatalogProvider>,
        checkout: Box<dyn CheckoutProvider>,
    ) -> Self {
        let (job_sender, job_receiver) = channel();
        let config: &AppConfig = store.config();
        let reveal = RevealState::new(config.reveal_chunk, config.reveal_debounce_ms);
        Self {
            store,
            prefs: UiPrefs::default(),
            active_slot: None,
            press: None,
            reveal,
            catalog_status: CatalogStatus::Loading,
            device: DeviceProfile::default(),
            show_reset_confirm: false,
            last_checkout_url: None,
            wall_rect: None,
            catalog,
            checkout,
            job_sender,
            job_receiver,
        }
    }

    /// Restores shell preferences saved by a previous session.
    pub fn with_prefs(mut self, prefs: UiPrefs) -> Self {
        self.prefs = prefs;
        self
    }

    /// Starts the reveal window over for the current filter result.
    pub fn reset_reveal(&mut self) {
        self.reveal.reset(self.store.filtered_artworks().len());
    }
}
