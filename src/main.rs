// Booking Grid application
// Main entry point

use std::sync::Arc;

use anyhow::{anyhow, Context};
use booking_grid::services::booking::{BookingApi, HttpBookingApi};
use booking_grid::services::settings::SettingsService;
use booking_grid::ui_egui::BookingGridApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!("Starting Booking Grid");

    let settings = SettingsService::with_default_path().load_or_default();
    log::info!("Using booking API at {}", settings.api_base_url);

    let api: Arc<dyn BookingApi> =
        Arc::new(HttpBookingApi::from_settings(&settings).context("Failed to create API client")?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Booking Grid"),
        ..Default::default()
    };

    eframe::run_native(
        "Booking Grid",
        options,
        Box::new(move |cc| Ok(Box::new(BookingGridApp::new(cc, settings, api)))),
    )
    .map_err(|e| anyhow!("Failed to run application: {}", e))
}
