use std::path::Path;
use std::sync::Mutex;

use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use smart_garden_dashboard::config::{DashboardConfig, DEFAULT_CONFIG_FILE};
use smart_garden_dashboard::util::log;
use smart_garden_dashboard::{log_info, App};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = DashboardConfig::load(Path::new(DEFAULT_CONFIG_FILE))?;
    let logger = log::init(&config.logging.dir, config.logging.level)?;

    // The terminal belongs to the UI, so tracing goes to a file as well.
    let trace_file = std::fs::File::create(logger.log_dir().join("trace.log"))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(trace_file))
        .with_ansi(false)
        .with_max_level(config.logging.level.as_tracing_level())
        .init();

    log_info!(
        "Starting dashboard for {} ({})",
        config.device.device_id,
        config.device.base_url
    );

    let app = App::new(&config)?;
    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = app.run(terminal).await;
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
