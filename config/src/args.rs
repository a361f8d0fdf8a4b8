use clap::Parser;
use std::path::PathBuf;

/// Live throughput and latency gauge for a UniFi controller.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Config file to read instead of the default location (YAML or TOML).
    #[clap(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the default config file and exit.
    ///   THIS WILL OVERWRITE AN EXISTING CONFIG AT THAT LOCATION.
    #[clap(long = "create-config", action)]
    pub create_config: bool,

    /// Controller URL, without a trailing path (e.g. https://192.168.1.1:8443).
    #[clap(long, value_name = "URL")]
    pub url: Option<String>,

    /// Name of the site to query.
    #[clap(long, value_name = "SITE")]
    pub site: Option<String>,

    /// Controller username.
    #[clap(long, value_name = "USERNAME")]
    pub username: Option<String>,

    /// Controller password.
    #[clap(long, value_name = "PASSWORD", env = "UNIFI_THROUGHPUT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Upload gauge colour: blue, red, green, yellow, magenta, cyan or white.
    #[clap(long = "upload-color", value_name = "COLOR")]
    pub upload_color: Option<String>,

    /// Download gauge colour: blue, red, green, yellow, magenta, cyan or white.
    #[clap(long = "download-color", value_name = "COLOR")]
    pub download_color: Option<String>,

    /// Start with bars instead of arcs, in case arcs do not display well.
    #[clap(long = "bars", action)]
    pub bars: bool,

    /// Scale the gauges against the peak of the last N samples instead of the all-time peak.
    #[clap(long = "peak-window", value_name = "SAMPLES")]
    pub peak_window: Option<u64>,

    /// Timeout in seconds for each request to the controller.
    #[clap(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Accept self-signed controller certificates.
    #[clap(long = "insecure", action)]
    pub insecure: bool,

    /// Enables the displaying of logs in the TUI.
    #[clap(long = "verbose", action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(url) = &self.url {
                cache.insert("url".to_string(), url.clone().into());
            }
            if let Some(site) = &self.site {
                cache.insert("site".to_string(), site.clone().into());
            }
            if let Some(username) = &self.username {
                cache.insert("username".to_string(), username.clone().into());
            }
            if let Some(password) = &self.password {
                cache.insert("password".to_string(), password.clone().into());
            }
            if let Some(color) = &self.upload_color {
                cache.insert("upload_color".to_string(), color.clone().into());
            }
            if let Some(color) = &self.download_color {
                cache.insert("download_color".to_string(), color.clone().into());
            }
            if self.bars {
                cache.insert("use_bars".to_string(), true.into());
            }
            if let Some(samples) = self.peak_window {
                cache.insert("peak_window".to_string(), samples.into());
            }
            if let Some(timeout) = self.timeout {
                cache.insert("request_timeout_secs".to_string(), timeout.into());
            }
            if self.insecure {
                cache.insert("accept_invalid_certs".to_string(), true.into());
            }
            if self.verbose {
                cache.insert("verbose".to_string(), true.into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let version = clap::crate_version!();
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();
    let data_dir_path = crate::get_data_dir().display().to_string();

    format!(
        "\
{version}

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}
