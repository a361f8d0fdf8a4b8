use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env,
    path::{
        Path,
        PathBuf,
    },
};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

pub(crate) const PROJECT_NAME: &str = "UNIFI_THROUGHPUT";

lazy_static::lazy_static! {
    static ref DATA_FOLDER: Option<PathBuf> = env::var(format!("{PROJECT_NAME}_DATA"))
        .ok()
        .map(PathBuf::from);
    static ref CONFIG_FOLDER: Option<PathBuf> = env::var(format!("{PROJECT_NAME}_CONFIG"))
        .ok()
        .map(PathBuf::from);
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

/// File names looked up in the config directory, first match wins.
const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.toml"];

/// Where `--create-config` writes when no path is given.
pub fn default_config_file() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAMES[0])
}

/// The config file to load from `dir` when `--config` is not given, if there is one.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "unifi-throughput", "unifi-throughput")
}
