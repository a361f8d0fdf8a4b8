#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod keys;
mod palette;

use app_config::AppConfig;
pub use app_config::{
    default_config_file,
    find_config_file,
    get_config_dir,
    get_data_dir,
};
pub use args::Args;
use color_eyre::Result;
use derive_more::Debug;
use eyre::Context as _;
use keys::CanonicalKeys;
pub use palette::GaugeColor;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    collections::HashMap,
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    pub app_config: AppConfig,
    pub url: url::Url,
    pub site: String,
    pub username: String,
    #[debug(skip)]
    pub password: String,
    pub upload_color: GaugeColor,
    pub download_color: GaugeColor,
    #[serde(default)]
    pub use_bars: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_window: Option<u64>,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default)]
    pub verbose: bool,
}

pub const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl config::Source for Config {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        cache.insert("url".to_string(), self.url.to_string().into());
        cache.insert("site".to_string(), self.site.clone().into());
        cache.insert("username".to_string(), self.username.clone().into());
        cache.insert("password".to_string(), self.password.clone().into());
        cache.insert("upload_color".to_string(), self.upload_color.to_string().into());
        cache.insert("download_color".to_string(), self.download_color.to_string().into());
        cache.insert("use_bars".to_string(), self.use_bars.into());
        if let Some(samples) = self.peak_window {
            cache.insert("peak_window".to_string(), samples.into());
        }
        cache.insert("request_timeout_secs".to_string(), self.request_timeout_secs.into());
        cache.insert("accept_invalid_certs".to_string(), self.accept_invalid_certs.into());
        cache.insert("verbose".to_string(), self.verbose.into());
        Ok(cache.into_iter().collect())
    }
}

impl Config {
    /// Layers the built-in defaults, the config file and the command line, in that order.
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        builder = builder.add_source(Config::default());

        // Format is inferred from the extension so the classic `config.toml` keeps working.
        builder = match &args.config {
            Some(file) => builder.add_source(CanonicalKeys::new(config::File::from(file.as_path()).required(true))),
            None => match find_config_file(&config_dir) {
                Some(file) => {
                    debug!(?file, "using config file from the config directory");
                    builder.add_source(CanonicalKeys::new(config::File::from(file).required(true)))
                }
                None => builder,
            },
        };

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }

    pub fn data_dir(&self) -> &Path {
        &self.app_config.data_dir
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Number of samples the gauge peak is taken over, `None` for the all-time peak.
    pub fn peak_window(&self) -> Option<usize> {
        self.peak_window
            .filter(|samples| *samples > 0)
            .map(|samples| usize::try_from(samples).unwrap_or(usize::MAX))
    }
}

/// Writes the default config template to `path`, replacing whatever is there.
#[instrument(level = "debug")]
pub fn create_default_config(path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).wrap_err_with(|| format!("Failed to create config directory {dir:?}"))?;
    }
    std::fs::write(path, DEFAULT_CONFIG).wrap_err_with(|| format!("Failed to write config to {path:?}"))?;
    info!(?path, "wrote default config");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use temp_dir::TempDir;

    fn args_with_file(path: PathBuf) -> Args {
        Args {
            config: Some(path),
            ..Default::default()
        }
    }

    #[test]
    fn default_template_parses() {
        let config = Config::default();
        assert_eq!(config.url.as_str(), "https://demo.ubnt.com/");
        assert_eq!(config.site, "default");
        assert_eq!(config.username, "superadmin");
        assert_eq!(config.upload_color, GaugeColor::Blue);
        assert_eq!(config.download_color, GaugeColor::Cyan);
        assert!(!config.use_bars);
        assert_eq!(config.peak_window(), None);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("config.yaml");
        std::fs::write(
            &file,
            "url: \"https://unifi.local:8443\"\nsite: office\nuse_bars: true\npeak_window: 20\n",
        )
        .unwrap();

        let config = Config::new(args_with_file(file)).unwrap();
        assert_eq!(config.url.as_str(), "https://unifi.local:8443/");
        assert_eq!(config.site, "office");
        assert!(config.use_bars);
        assert_eq!(config.peak_window(), Some(20));
        // Untouched keys keep their defaults.
        assert_eq!(config.upload_color, GaugeColor::Blue);
    }

    #[test]
    fn classic_toml_file_is_accepted() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("config.toml");
        std::fs::write(
            &file,
            r#"
url="https://demo.ubnt.com"
site = "lab"
username = "admin"
password ="hunter2"
UploadColor = "red"
DownloadColor = "plaid"
UseBars = true
"#,
        )
        .unwrap();

        let config = Config::new(args_with_file(file)).unwrap();
        assert_eq!(config.site, "lab");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.upload_color, GaugeColor::Red);
        assert_eq!(config.download_color, GaugeColor::White);
        assert!(config.use_bars);
    }

    #[test]
    fn command_line_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("config.yaml");
        std::fs::write(&file, "site: office\nupload_color: green\n").unwrap();

        let args = Args {
            config: Some(file),
            site: Some("branch".to_string()),
            upload_color: Some("magenta".to_string()),
            timeout: Some(3),
            insecure: true,
            ..Default::default()
        };
        let config = Config::new(args).unwrap();
        assert_eq!(config.site, "branch");
        assert_eq!(config.upload_color, GaugeColor::Magenta);
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn huge_peak_window_saturates() {
        let mut config = Config::default();
        config.peak_window = Some(u64::MAX);
        assert_eq!(config.peak_window(), Some(usize::MAX));
        config.peak_window = Some(0);
        assert_eq!(config.peak_window(), None);
    }

    #[test]
    fn config_dir_prefers_yaml_then_classic_toml() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_config_file(dir.path()), None);

        std::fs::write(dir.child("config.toml"), "site = \"lab\"\n").unwrap();
        assert_eq!(find_config_file(dir.path()), Some(dir.child("config.toml")));

        std::fs::write(dir.child("config.yaml"), "site: office\n").unwrap();
        assert_eq!(find_config_file(dir.path()), Some(dir.child("config.yaml")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::new(args_with_file(dir.child("nope.yaml"))).is_err());
    }

    #[test]
    fn create_default_config_writes_template() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("nested").join("config.yaml");
        let written = create_default_config(&file).unwrap();
        assert_eq!(written, file);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), DEFAULT_CONFIG);

        let config = Config::new(args_with_file(file)).unwrap();
        assert_eq!(config.site, "default");
    }

    #[test]
    fn debug_output_hides_password() {
        let mut config = Config::default();
        config.password = "hunter2".to_string();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
