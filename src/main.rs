use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};
use wavywalls::app::App;
use wavywalls::config::Config;
use wavywalls::logging::init_logging;
use wavywalls::model::catalog::load_catalog;
use wavywalls::service::PlaceholderService;

fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log_path(), &config.log_level) {
        eprintln!("Logging disabled: {:#}", e);
    }

    let catalog = match load_catalog(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("catalog load failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let picker = ratatui_image::picker::Picker::from_query_stdio().unwrap_or_else(|e| {
        info!("terminal graphics query failed ({}), using fallback", e);
        ratatui_image::picker::Picker::from_fontsize((8, 16))
    });

    let mut app = App::new(config, catalog, Arc::new(PlaceholderService), Some(picker));
    if let Err(e) = app.run() {
        error!("{:#}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
