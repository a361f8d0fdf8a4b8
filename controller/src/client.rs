use crate::{
    error::{
        AuthError,
        ClientError,
        PollError,
    },
    health::{
        self,
        Sample,
    },
    session::{
        Credentials,
        SessionManager,
    },
};
use std::{
    future::Future,
    time::Duration,
};
use unifi_throughput_config::Config;
use url::Url;

/// What the poller needs from a controller.
pub trait Controller: Send {
    /// Attempt a fresh login.
    fn login(&mut self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Read one health sample.
    fn fetch_health(&mut self) -> impl Future<Output = Result<Sample, PollError>> + Send;
}

/// Base URL of the controller plus the site whose health is queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
    site: String,
}

impl Endpoint {
    pub fn new(base: Url, site: impl ToString) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint(base));
        }
        Ok(Self {
            base,
            site: site.to_string(),
        })
    }

    /// `POST {base}/api/login`
    pub fn login_url(&self) -> Url {
        self.api(&["login"])
    }

    /// `GET {base}/api/s/{site}/stat/health`
    pub fn health_url(&self) -> Url {
        self.api(&["s", &self.site, "stat", "health"])
    }

    fn api(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }
}

/// [`Controller`] backed by a cookie-keeping HTTP client.
#[derive(Debug)]
pub struct ControllerClient {
    endpoint: Endpoint,
    session: SessionManager,
    http: reqwest::Client,
    timeout: Duration,
}

impl ControllerClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let endpoint = Endpoint::new(config.url.clone(), &config.site)?;
        let credentials = Credentials::new(&config.username, &config.password);
        Self::with_options(endpoint, credentials, config.request_timeout(), config.accept_invalid_certs)
    }

    pub fn with_options(
        endpoint: Endpoint,
        credentials: Credentials,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, ClientError> {
        if accept_invalid_certs {
            warn!("certificate verification is disabled for the controller");
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            session: SessionManager::new(http.clone(), credentials, timeout),
            endpoint,
            http,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

impl Controller for ControllerClient {
    async fn login(&mut self) -> Result<(), AuthError> {
        self.session.login(self.endpoint.login_url()).await
    }

    async fn fetch_health(&mut self) -> Result<Sample, PollError> {
        health::fetch(&self.http, self.endpoint.health_url(), self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn endpoint(base: &str, site: &str) -> Endpoint {
        Endpoint::new(Url::parse(base).unwrap(), site).unwrap()
    }

    #[test]
    fn builds_api_urls_from_a_bare_host() {
        let endpoint = endpoint("https://demo.ubnt.com", "default");
        assert_eq!(endpoint.login_url().as_str(), "https://demo.ubnt.com/api/login");
        assert_eq!(
            endpoint.health_url().as_str(),
            "https://demo.ubnt.com/api/s/default/stat/health"
        );
    }

    #[test]
    fn keeps_a_path_prefix() {
        let endpoint = endpoint("https://192.168.1.1:8443/unifi/", "office");
        assert_eq!(endpoint.login_url().as_str(), "https://192.168.1.1:8443/unifi/api/login");
        assert_eq!(
            endpoint.health_url().as_str(),
            "https://192.168.1.1:8443/unifi/api/s/office/stat/health"
        );
    }

    #[test]
    fn escapes_the_site_name() {
        let endpoint = endpoint("https://unifi.local", "a/b");
        assert_eq!(endpoint.health_url().as_str(), "https://unifi.local/api/s/a%2Fb/stat/health");
    }

    #[test]
    fn rejects_urls_without_a_path() {
        let url = Url::parse("mailto:admin@example.com").unwrap();
        assert!(matches!(Endpoint::new(url, "default"), Err(ClientError::InvalidEndpoint(_))));
    }

    #[test]
    fn builds_from_config() {
        let client = ControllerClient::new(&Config::default()).unwrap();
        assert_eq!(
            client.endpoint().health_url().as_str(),
            "https://demo.ubnt.com/api/s/default/stat/health"
        );
        assert!(!client.is_authenticated());
    }
}
