//! # Gallery Wall
//!
//! Configurator for a gallery wall of framed prints. Shoppers move through a
//! four-step wizard:
//! - **Room**: pick a room and a wall background
//! - **Layout**: pick an arrangement of frame slots
//! - **Artworks**: fill slots from a filterable catalog, choose frames, drag
//!   the group (or single frames) into place
//! - **Checkout**: review quantities and hand the cart to the storefront
//!
//! ## Features
//! - Every selection is persisted and restored on the next start
//! - Snapshot undo/redo over the visual configuration
//! - Elastic, bounded group dragging
//! - Native desktop and web builds

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod constants;
pub mod data;
pub mod drag;
pub mod filter;
pub mod history;
pub mod storage;
pub mod store;
mod types;
mod ui;
pub mod viewport;

// Re-export public types and functions
pub use types::*;
pub use store::{LayoutChange, SelectionStore};
pub use ui::{CatalogStatus, GalleryApp, RevealState, UiPrefs};

use catalog::StaticCatalog;
use checkout::PermalinkCheckout;
use config::AppConfig;
use storage::KeyValueStore;

/// Builds the app from the creation context: restores shell preferences and
/// starts the catalog fetch.
fn build_app(cc: &eframe::CreationContext<'_>, storage: Box<dyn KeyValueStore>, config: AppConfig) -> GalleryApp {
    let prefs = cc
        .storage
        .and_then(|s| eframe::get_value::<UiPrefs>(s, ui::PREFS_KEY))
        .unwrap_or_default();
    let checkout = PermalinkCheckout::new(config.shop_domain.clone());
    let store = SelectionStore::load(storage, config);
    let mut app = GalleryApp::new(store, Box::new(StaticCatalog::bundled()), Box::new(checkout)).with_prefs(prefs);
    app.request_catalog(Some(cc.egui_ctx.clone()));
    app
}

/// Runs the configurator in a native window.
///
/// The selection is stored in the per-user application directory; if that is
/// unavailable the session runs from memory only.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     gallery_wall::run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let config = AppConfig::load();
    let storage: Box<dyn KeyValueStore> = match storage::FileStorage::in_app_dir(constants::APP_ID) {
        Some(file) => Box::new(file),
        None => {
            log::warn!("no storage directory, selection will not survive a restart");
            Box::new(storage::MemoryStorage::new())
        }
    };
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        constants::APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(build_app(cc, storage, config)))),
    )
}

/// Starts the configurator on the canvas with id `canvas_id`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub async fn start(canvas_id: String) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let _ = eframe::WebLogger::init(log::LevelFilter::Info);
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let canvas = document
        .get_element_by_id(&canvas_id)
        .ok_or("canvas not found")?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;
    let storage: Box<dyn KeyValueStore> = match storage::LocalStorage::open() {
        Some(local) => Box::new(local),
        None => Box::new(storage::MemoryStorage::new()),
    };
    let config = AppConfig::load();
    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(move |cc| Ok(Box::new(build_app(cc, storage, config)))),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_starts_at_step_one() {
        let selection = Selection::default();
        assert_eq!(selection.current_step, Step::Step1);
        assert!(selection.is_locked);
        assert!(selection.cart_items.is_empty());
    }

    #[test]
    fn bundled_catalog_covers_every_layout_size() {
        let artworks = StaticCatalog::bundled().parse().unwrap();
        for layout in data::layouts() {
            for frame in &layout.frames {
                let wanted = filter::normalize_size(&frame.size);
                assert!(
                    artworks
                        .iter()
                        .any(|a| a.sizes.iter().any(|s| filter::normalize_size(s) == wanted)),
                    "no artwork sold in {}",
                    frame.size
                );
            }
        }
    }
}
