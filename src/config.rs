//! Connection configuration
//!
//! Resolves the two logical settings a connection needs, the API base URL
//! and the access token, from structured configuration with an environment
//! fallback. Structured configuration always wins.
//!
//! ```yaml
//! base_url: "https://gitlab.example.com/api/v4"
//! token: "glpat-..."
//! timeout_secs: 30
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::Deployment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// API root of the public GitLab instance
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";

/// Environment variable holding the fallback base URL
pub const ENV_ADDR: &str = "GITLAB_ADDR";

/// Environment variable holding the fallback access token
pub const ENV_TOKEN: &str = "GITLAB_TOKEN";

const PUBLIC_HOST: &str = "gitlab.com";

// ============================================================================
// Connection Config
// ============================================================================

/// Structured per-connection configuration (file or CLI flags)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// API base URL, e.g. `https://gitlab.example.com/api/v4`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Personal or project access token
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the access token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load a config from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read connection file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Overlay `other` on top of `self`; set fields in `other` win
    #[must_use]
    pub fn merge(self, other: ConnectionConfig) -> Self {
        Self {
            base_url: other.base_url.or(self.base_url),
            token: other.token.or(self.token),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Fallback settings taken from the process environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Value of `GITLAB_ADDR`
    pub addr: Option<String>,
    /// Value of `GITLAB_TOKEN`
    pub token: Option<String>,
}

impl Environment {
    /// An environment with nothing set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the fallback variables from the process environment.
    ///
    /// This is the only place the crate reads environment variables.
    pub fn from_process() -> Self {
        Self {
            addr: std::env::var(ENV_ADDR).ok(),
            token: std::env::var(ENV_TOKEN).ok(),
        }
    }
}

// ============================================================================
// Connection
// ============================================================================

/// Resolved, immutable connection settings for one query session
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    /// API base URL without a trailing slash
    pub base_url: String,
    /// Bearer token
    pub token: String,
    /// Public or self-managed instance
    pub deployment: Deployment,
    /// Request timeout
    pub timeout: Duration,
}

impl Connection {
    /// Whether the connection targets the public multi-tenant instance
    pub fn is_public(&self) -> bool {
        self.deployment.is_public()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Resolve a connection from structured config with environment fallback.
///
/// No network call is made here.
pub fn resolve(config: &ConnectionConfig, env: &Environment) -> Result<Connection> {
    let (base_url, deployment) = resolve_endpoint(config, env)?;

    let token = non_empty(config.token.as_ref())
        .or_else(|| non_empty(env.token.as_ref()))
        .ok_or_else(|| Error::missing_credential("token"))?
        .to_string();

    Ok(Connection {
        base_url,
        token,
        deployment,
        timeout: Duration::from_secs(config.timeout_secs.unwrap_or(30)),
    })
}

/// Resolve only the base URL and its deployment kind.
///
/// Planning a query needs the deployment but never the token.
pub fn resolve_endpoint(
    config: &ConnectionConfig,
    env: &Environment,
) -> Result<(String, Deployment)> {
    let base_url = non_empty(config.base_url.as_ref())
        .or_else(|| non_empty(env.addr.as_ref()))
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();

    let parsed = url::Url::parse(&base_url)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidConfigValue {
            field: "base_url".to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    let deployment = match parsed.host_str() {
        Some(host) if host.eq_ignore_ascii_case(PUBLIC_HOST) => Deployment::Public,
        _ => Deployment::SelfManaged,
    };

    Ok((base_url, deployment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(addr: Option<&str>, token: Option<&str>) -> Environment {
        Environment {
            addr: addr.map(String::from),
            token: token.map(String::from),
        }
    }

    #[test]
    fn test_defaults_to_public_endpoint() {
        let config = ConnectionConfig::new().with_token("abc");
        let conn = resolve(&config, &Environment::empty()).unwrap();

        assert_eq!(conn.base_url, DEFAULT_BASE_URL);
        assert_eq!(conn.token, "abc");
        assert!(conn.is_public());
        assert_eq!(conn.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_environment_fallback() {
        let conn = resolve(
            &ConnectionConfig::new(),
            &env(Some("https://git.example.com/api/v4/"), Some("env-token")),
        )
        .unwrap();

        assert_eq!(conn.base_url, "https://git.example.com/api/v4");
        assert_eq!(conn.token, "env-token");
        assert_eq!(conn.deployment, Deployment::SelfManaged);
    }

    #[test]
    fn test_config_overrides_environment() {
        let config = ConnectionConfig::new()
            .with_base_url("https://gitlab.internal/api/v4")
            .with_token("config-token");
        let conn = resolve(
            &config,
            &env(Some("https://other.example.com"), Some("env-token")),
        )
        .unwrap();

        assert_eq!(conn.base_url, "https://gitlab.internal/api/v4");
        assert_eq!(conn.token, "config-token");
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = resolve(&ConnectionConfig::new(), &env(Some(DEFAULT_BASE_URL), None))
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredential { .. }));
        assert!(err.is_config());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = ConnectionConfig::new().with_token("   ");
        let err = resolve(&config, &Environment::empty()).unwrap_err();
        assert!(matches!(err, Error::MissingCredential { .. }));

        let config = ConnectionConfig::new().with_base_url("").with_token("t");
        let conn = resolve(&config, &env(Some("https://git.example.com"), None)).unwrap();
        assert_eq!(conn.base_url, "https://git.example.com");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ConnectionConfig::new()
            .with_base_url("not a url")
            .with_token("t");
        assert!(matches!(
            resolve(&config, &Environment::empty()),
            Err(Error::InvalidUrl(_))
        ));

        let config = ConnectionConfig::new()
            .with_base_url("ftp://gitlab.com")
            .with_token("t");
        assert!(matches!(
            resolve(&config, &Environment::empty()),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_parse_yaml_and_merge() {
        let yaml = r#"
base_url: "https://gitlab.example.com/api/v4"
token: "from-file"
timeout_secs: 10
"#;
        let file = ConnectionConfig::from_yaml(yaml).unwrap();
        assert_eq!(file.timeout_secs, Some(10));

        let flags = ConnectionConfig::new().with_token("from-flag");
        let merged = file.merge(flags);
        assert_eq!(
            merged.base_url.as_deref(),
            Some("https://gitlab.example.com/api/v4")
        );
        assert_eq!(merged.token.as_deref(), Some("from-flag"));
        assert_eq!(merged.timeout_secs, Some(10));
    }

    #[test]
    fn test_debug_redacts_token() {
        let conn = resolve(
            &ConnectionConfig::new().with_token("super-secret"),
            &Environment::empty(),
        )
        .unwrap();
        let debug = format!("{conn:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_endpoint_resolves_without_token() {
        let (base_url, deployment) = resolve_endpoint(
            &ConnectionConfig::new(),
            &env(Some("https://gitlab.example.com/api/v4/"), None),
        )
        .unwrap();
        assert_eq!(base_url, "https://gitlab.example.com/api/v4");
        assert_eq!(deployment, Deployment::SelfManaged);

        let (_, deployment) =
            resolve_endpoint(&ConnectionConfig::new(), &Environment::empty()).unwrap();
        assert_eq!(deployment, Deployment::Public);
    }

    #[test]
    fn test_missing_connection_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connection.yaml");

        let err = ConnectionConfig::from_file(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to read connection file"));
        assert!(message.contains("connection.yaml"));
    }
}
