use eyre::{
    Context as _,
    OptionExt as _,
    Result,
};
use tracing_subscriber::prelude::*;
use tui_logger::TuiLoggerFile;
use unifi_throughput_config::get_data_dir;

lazy_static::lazy_static! {
    static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Collects every record in memory for the log pane and mirrors it to `<data_dir>/unifi-throughput-tui.log`.
pub fn log_init() -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory).context("Failed to create directory")?;
    let log_path = directory.join(LOG_FILE.as_str());
    if log_path.exists() {
        std::fs::remove_file(&log_path).context("Failed to remove existing log file")?;
    }

    tui_logger::init_logger(tui_logger::LevelFilter::Trace).context("Failed to initialize tui logger")?;
    tui_logger::set_default_level(tui_logger::LevelFilter::Debug);
    // reqwest and friends are chatty at debug.
    for target in ["hyper_util", "reqwest", "cookie_store", "rustls"] {
        tui_logger::set_level_for_target(target, tui_logger::LevelFilter::Info);
    }
    let log_path = log_path.to_str().ok_or_eyre("Log path is not valid UTF-8")?;
    tui_logger::set_log_file(TuiLoggerFile::new(log_path));

    tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(tui_logger::TuiTracingSubscriberLayer)
        .try_init()
        .context("Failed to initialize tracing subscriber")
}
