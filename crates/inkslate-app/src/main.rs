//! Main application entry point.

use inkslate_app::{App, AppConfig};

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting Inkslate");

    App::run(AppConfig::default())
}
