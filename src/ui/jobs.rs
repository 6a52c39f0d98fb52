//! Async collaborator calls for both native and WASM platforms.
//!
//! Jobs run on the tokio runtime natively and on the browser event loop on
//! the web. Each job reports back through the app's channel; results are
//! applied at the start of the next frame by [`GalleryApp::handle_pending_jobs`].

use super::state::{CatalogStatus, GalleryApp, JobResult};
use eframe::egui;
use std::future::Future;

impl GalleryApp {
    /// Applies every job result that arrived since the last frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context, used to wake the UI for follow-up work
    pub fn handle_pending_jobs(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.job_receiver.try_recv() {
            match result {
                JobResult::CatalogLoaded(Ok(artworks)) => {
                    self.store.set_catalog(artworks);
                    self.catalog_status = CatalogStatus::Ready;
                    self.reset_reveal();
                }
                JobResult::CatalogLoaded(Err(err)) => {
                    log::error!("catalog fetch failed: {err}");
                    self.catalog_status = CatalogStatus::Failed(err.to_string());
                }
                JobResult::CheckoutFinished(result) => {
                    if let Ok(url) = self.store.finish_checkout(result) {
                        open_checkout(&url);
                        self.last_checkout_url = Some(url);
                    }
                }
            }
            ctx.request_repaint();
        }
    }

    /// Fetches the catalog in the background.
    pub fn request_catalog(&mut self, ctx: Option<egui::Context>) {
        self.catalog_status = CatalogStatus::Loading;
        let fetch = self.catalog.fetch();
        let sender = self.job_sender.clone();
        spawn_job(async move {
            let result = fetch.await;
            let _ = sender.send(JobResult::CatalogLoaded(result));
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    }

    /// Validates the cart and hands it to the checkout provider.
    ///
    /// Validation errors are kept in the store and shown next to the button.
    pub fn start_checkout(&mut self, ctx: &egui::Context) {
        if self.store.is_checking_out() {
            return;
        }
        let Ok(lines) = self.store.begin_checkout() else {
            return;
        };
        let create = self.checkout.create_checkout(lines);
        let sender = self.job_sender.clone();
        let ctx = ctx.clone();
        spawn_job(async move {
            let result = create.await;
            let _ = sender.send(JobResult::CheckoutFinished(result));
            ctx.request_repaint();
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_job<F>(job: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(job);
        }
        // Headless runs have no runtime; the providers resolve without I/O there.
        Err(_) => futures::executor::block_on(job),
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn_job<F>(job: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(job);
}

/// Sends the shopper to the hosted checkout.
#[cfg(not(target_arch = "wasm32"))]
fn open_checkout(url: &str) {
    log::info!("opening checkout {url}");
    if let Err(err) = webbrowser::open(url) {
        log::error!("failed to open browser: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn open_checkout(url: &str) {
    log::info!("redirecting to checkout {url}");
    let Some(window) = web_sys::window() else {
        return;
    };
    if window.location().set_href(url).is_err() {
        log::error!("browser refused the checkout redirect");
    }
}
