mod app;
mod convert;
mod messages;
mod panels;
mod progress;
mod states;
mod workers;

use std::path::PathBuf;

use docscan_core::config::AppConfig;
use tracing::{info, warn};

/// Environment variable naming the config file to start with.
const CONFIG_ENV: &str = "DOCSCAN_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "docscan.toml";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let (config, config_path) = startup_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("DocScan"),
        ..Default::default()
    };

    eframe::run_native(
        "DocScan",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::DocScanApp::new(
                &cc.egui_ctx,
                config,
                config_path,
            )))
        }),
    )
}

/// Config from `$DOCSCAN_CONFIG`, then `./docscan.toml`, then defaults.
fn startup_config() -> (AppConfig, Option<PathBuf>) {
    let candidate = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        });

    let Some(path) = candidate else {
        return (AppConfig::default(), None);
    };
    match AppConfig::load(&path) {
        Ok(config) => {
            info!(path = %path.display(), "Loaded config");
            (config, Some(path))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
            (AppConfig::default(), None)
        }
    }
}
