mod app;
mod platform;
mod ui;

use autocrm::config::AppConfig;
use tracing::{info, warn};

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load config, using defaults: {err:#}");
            AppConfig::default()
        }
    };
    autocrm::logging::init(&config.log_filter);

    let webview_data_dir = config
        .webview_data_dir()
        .expect("should resolve and create webview data directory");
    match config.db_path() {
        Ok(path) => info!(db = %path.display(), "starting autocrm"),
        Err(err) => warn!(error = %err, "unable to resolve database path"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("AutoCRM"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
