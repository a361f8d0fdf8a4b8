use clap::Parser;
use color_eyre::Result;
use unifi_throughput_config::{
    create_default_config,
    default_config_file,
    Args,
};
use unifi_throughput_tui::{
    init_errors,
    logging,
    App,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();

    if args.create_config {
        let path = args.config.clone().unwrap_or_else(default_config_file);
        let path = create_default_config(&path)?;
        println!("Config created at {}", path.display());
        return Ok(());
    }

    logging::log_init()?;
    App::new(args)?.run().await
}
