use crate::error::AuthError;
use derive_more::Debug;
use std::time::Duration;
use url::Url;

/// Username and password for the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    #[debug(skip)]
    password: String,
}

impl Credentials {
    pub fn new(username: impl ToString, password: impl ToString) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn as_login_body(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

/// Owns the authenticated state against the controller.
///
/// The session itself is a cookie kept in the cookie store of the shared [`reqwest::Client`], so every request made
/// through a clone of that client reuses it.
#[derive(Debug)]
pub struct SessionManager {
    #[debug(skip)]
    http: reqwest::Client,
    credentials: Credentials,
    authenticated: bool,
    timeout: Duration,
}

impl SessionManager {
    pub fn new(http: reqwest::Client, credentials: Credentials, timeout: Duration) -> Self {
        Self {
            http,
            credentials,
            authenticated: false,
            timeout,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Attempts a fresh login regardless of the current state. Failures are returned, never raised.
    pub async fn login(&mut self, url: Url) -> Result<(), AuthError> {
        self.authenticated = false;
        info!(username = %self.credentials.username, %url, "logging in");

        let response = self
            .http
            .post(url)
            .json(&self.credentials.as_login_body())
            .send()
            .await
            .map_err(|err| AuthError::from_reqwest(err, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected(status));
        }

        self.authenticated = true;
        debug!("logged in");
        Ok(())
    }
}
