mod app;
mod config;
mod effects;
mod logging;
mod ui;

use std::path::PathBuf;

use linkdrop_core::AppState;
use linkdrop_logging::{linkdrop_info, linkdrop_warn};

use app::LinkdropApp;
use effects::EffectRunner;

pub fn run_app() -> eframe::Result {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let loaded = config::load_config(&cwd);
    let mut app_config = loaded.as_ref().cloned().unwrap_or_default();
    app_config.apply_origin_override(std::env::var(config::ORIGIN_ENV).ok());

    logging::initialize(app_config.log_destination);
    if let Err(err) = &loaded {
        linkdrop_warn!("{}; using default settings", err);
    }
    linkdrop_info!("Using backend at {}", app_config.backend_origin);

    let state = AppState::new().with_origin(app_config.backend_origin.clone());
    let settings = app_config.backend_settings();

    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        ui::layout::native_options(),
        Box::new(move |cc| {
            ui::layout::configure_style(&cc.egui_ctx);
            let runner = EffectRunner::new(settings)?;
            Ok(Box::new(LinkdropApp::new(state, runner)))
        }),
    )
}
