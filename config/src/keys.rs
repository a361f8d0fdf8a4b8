use config::{
    ConfigError,
    Map,
    Source,
    Value,
};

const KNOWN_KEYS: [&str; 11] = [
    "url",
    "site",
    "username",
    "password",
    "upload_color",
    "download_color",
    "use_bars",
    "peak_window",
    "request_timeout_secs",
    "accept_invalid_certs",
    "verbose",
];

/// Rewrites `UploadColor`, `uploadcolor` or `upload-color` to `upload_color` so that config files written for
/// earlier releases keep loading.
#[derive(Clone, Debug)]
pub(crate) struct CanonicalKeys<S>(S);

impl<S> CanonicalKeys<S> {
    pub(crate) fn new(source: S) -> Self {
        Self(source)
    }
}

impl<S> Source for CanonicalKeys<S>
where
    S: Source + Clone + Send + Sync + 'static,
{
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self
            .0
            .collect()?
            .into_iter()
            .map(|(key, value)| (canonical_key(&key), value))
            .collect())
    }
}

fn canonical_key(key: &str) -> String {
    let squashed = key
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect::<String>();
    KNOWN_KEYS
        .iter()
        .find(|known| known.replace('_', "") == squashed)
        .map(|known| known.to_string())
        .unwrap_or_else(|| key.to_string())
}
