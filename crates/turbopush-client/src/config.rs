//! Public configuration for the Turbo Push client.

use std::time::Duration;

/// Configuration for the Turbo Push API client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use turbopush_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("http://127.0.0.1:8910")
///     .with_timeout(Duration::from_secs(60))
///     .with_token("open-id-token");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the locally served API, e.g. `http://127.0.0.1:8910`
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Optional authentication token (sent raw in the `Authorization` header)
    pub(crate) token: Option<String>,
}

impl ClientConfig {
    /// Create a configuration pointing at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // The service paths all start with '/'
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            user_agent: concat!("turbopush-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }

    /// Create a configuration from a handshake port, binding to loopback.
    #[must_use]
    pub fn for_port(port: u16) -> Self {
        Self::new(format!("http://127.0.0.1:{port}"))
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional authentication token.
    ///
    /// The handshake's `auth` field is nullable, so this takes an `Option`.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("http://127.0.0.1:8910");
        assert_eq!(config.base_url, "http://127.0.0.1:8910");
        assert!(config.user_agent.contains("turbopush-client"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://127.0.0.1:8910/");
        assert_eq!(config.base_url, "http://127.0.0.1:8910");
    }

    #[test]
    fn test_for_port() {
        let config = ClientConfig::for_port(9001);
        assert_eq!(config.base_url, "http://127.0.0.1:9001");
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::new("http://127.0.0.1:8910")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(60))
            .with_token("secret");

        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.token, Some("secret".to_string()));
    }

    #[test]
    fn test_optional_token() {
        let with_token =
            ClientConfig::new("http://x").with_optional_token(Some("token".to_string()));
        assert_eq!(with_token.token, Some("token".to_string()));

        let without_token = ClientConfig::new("http://x").with_optional_token(None);
        assert!(without_token.token.is_none());
    }
}
