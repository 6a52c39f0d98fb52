#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    // RUST_LOG controls verbosity
    env_logger::init();

    gallery_wall::run_app()
}

// The web build starts through `gallery_wall::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
