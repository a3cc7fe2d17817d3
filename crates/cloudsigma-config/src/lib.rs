//! Shared configuration for CloudSigma API clients.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to a ready [`cloudsigma::Client`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cloudsigma::{
    Client, ClientConfig, Credentials, CredentialsProvider, TlsMode, TransportConfig,
};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Fallback variable for an access token.
pub const ENV_TOKEN: &str = "CLOUDSIGMA_TOKEN";
/// Fallback variable for the account email.
pub const ENV_USERNAME: &str = "CLOUDSIGMA_USERNAME";
/// Fallback variable for the account password.
pub const ENV_PASSWORD: &str = "CLOUDSIGMA_PASSWORD";

const ENV_PREFIX: &str = "CLOUDSIGMA_";
const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] cloudsigma::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
///
/// ```toml
/// default_profile = "zrh"
///
/// [defaults]
/// timeout = 60
///
/// [profiles.zrh]
/// location = "zrh"
/// token_env = "CS_ZRH_TOKEN"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    /// Values a profile falls back to.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile, falling back to `default_profile`, then `"default"`.
    pub fn profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE);

        self.profiles
            .get(name)
            .map(|profile| (name, profile))
            .ok_or_else(|| ConfigError::Validation {
                field: "profile".into(),
                reason: format!("no profile named '{name}'"),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default)]
    pub insecure: bool,

    /// Request deadline in seconds. Unset means no deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// A named account profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Region sub-domain, e.g. `zrh`, `fra`, `sjc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Cloud domain. Set for private clouds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Access token (plaintext; prefer `token_env`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable holding the access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Account email for basic auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for basic auth (plaintext; prefer `password_env`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Path to a custom CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override the default insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override the default timeout, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cloudsigma", "cloudsigma").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cloudsigma");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file, layered as defaults → file → env.
///
/// Env keys use `__` as the nesting separator, e.g.
/// `CLOUDSIGMA_PROFILES__FRA__LOCATION=fra`. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve credentials for a profile from the process environment.
///
/// Order: `token_env`, `token`, then `username` (or `CLOUDSIGMA_USERNAME`)
/// with `password_env`, `CLOUDSIGMA_PASSWORD` or `password`, and finally
/// `CLOUDSIGMA_TOKEN`.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    resolve_credentials_with(profile, profile_name, |key| std::env::var(key).ok())
}

/// [`resolve_credentials`] with a caller-supplied variable lookup.
pub fn resolve_credentials_with<F>(
    profile: &Profile,
    profile_name: &str,
    lookup: F,
) -> Result<Credentials, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| lookup(key).filter(|v| !v.is_empty());

    // 1. Profile's token_env → env var lookup
    if let Some(token) = profile.token_env.as_deref().and_then(env) {
        debug!(profile = profile_name, "token from profile token_env");
        return Ok(Credentials::Token(SecretString::from(token)));
    }

    // 2. Plaintext token in config
    if let Some(token) = profile.token.as_ref().filter(|t| !t.is_empty()) {
        debug!(profile = profile_name, "token from profile");
        return Ok(Credentials::Token(SecretString::from(token.clone())));
    }

    // 3. Username + password
    let username = profile
        .username
        .clone()
        .filter(|u| !u.is_empty())
        .or_else(|| env(ENV_USERNAME));
    if let Some(username) = username {
        let password = profile
            .password_env
            .as_deref()
            .and_then(env)
            .or_else(|| env(ENV_PASSWORD))
            .or_else(|| profile.password.clone().filter(|p| !p.is_empty()))
            .ok_or_else(|| ConfigError::NoCredentials {
                profile: profile_name.into(),
            })?;
        debug!(profile = profile_name, "username and password");
        return Ok(Credentials::UsernamePassword {
            username,
            password: SecretString::from(password),
        });
    }

    // 4. Global token fallback
    if let Some(token) = env(ENV_TOKEN) {
        debug!(profile = profile_name, "token from {ENV_TOKEN}");
        return Ok(Credentials::Token(SecretString::from(token)));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve credentials and wrap them as a provider for [`Client::new`].
pub fn credentials_provider(
    profile: &Profile,
    profile_name: &str,
) -> Result<Arc<dyn CredentialsProvider>, ConfigError> {
    let credentials = resolve_credentials(profile, profile_name)?;
    credentials.validate()?;
    Ok(Arc::new(credentials))
}

// ── Client construction ─────────────────────────────────────────────

/// Build a `ClientConfig` from a profile and the global defaults.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::default();

    if let Some(location) = profile.location.as_ref().or(defaults.location.as_ref()) {
        config.location.clone_from(location);
    }
    if let Some(domain) = profile.domain.as_ref().or(defaults.domain.as_ref()) {
        config.domain.clone_from(domain);
    }
    if let Some(api_version) = &profile.api_version {
        config.api_version.clone_from(api_version);
    }
    if let Some(user_agent) = &profile.user_agent {
        config.user_agent.clone_from(user_agent);
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };
    let mut transport = TransportConfig::default().with_tls(tls);

    match profile.timeout.or(defaults.timeout) {
        Some(0) => {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Some(secs) => transport = transport.with_timeout(Duration::from_secs(secs)),
        None => {}
    }
    config.transport = transport;

    // Reject locations or domains that cannot form a URL before any request.
    config.endpoint()?;

    Ok(config)
}

/// Build a ready [`Client`] for the named profile, or the default one.
pub fn build_client(config: &Config, profile_name: Option<&str>) -> Result<Client, ConfigError> {
    let (name, profile) = config.profile(profile_name)?;
    let client_config = profile_to_client_config(profile, &config.defaults)?;
    let credentials = credentials_provider(profile, name)?;
    Ok(Client::new(credentials, &client_config)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn token_of(credentials: &Credentials) -> &str {
        match credentials {
            Credentials::Token(token) => token.expose_secret(),
            Credentials::UsernamePassword { .. } => panic!("expected a token"),
        }
    }

    #[test]
    fn token_env_wins_over_plaintext() {
        let profile = Profile {
            token: Some("plain".into()),
            token_env: Some("MY_TOKEN".into()),
            ..Default::default()
        };

        let creds =
            resolve_credentials_with(&profile, "p", lookup(&[("MY_TOKEN", "from-env")])).unwrap();

        assert_eq!(token_of(&creds), "from-env");
    }

    #[test]
    fn unset_token_env_falls_through_to_plaintext() {
        let profile = Profile {
            token: Some("plain".into()),
            token_env: Some("MY_TOKEN".into()),
            ..Default::default()
        };

        let creds = resolve_credentials_with(&profile, "p", lookup(&[])).unwrap();

        assert_eq!(token_of(&creds), "plain");
    }

    #[test]
    fn username_with_password_env() {
        let profile = Profile {
            username: Some("user@example.com".into()),
            password: Some("plain".into()),
            password_env: Some("MY_PASSWORD".into()),
            ..Default::default()
        };

        let creds =
            resolve_credentials_with(&profile, "p", lookup(&[("MY_PASSWORD", "from-env")]))
                .unwrap();

        match creds {
            Credentials::UsernamePassword { username, password } => {
                assert_eq!(username, "user@example.com");
                assert_eq!(password.expose_secret(), "from-env");
            }
            Credentials::Token(_) => panic!("expected username/password"),
        }
    }

    #[test]
    fn global_password_beats_plaintext() {
        let profile = Profile {
            username: Some("user@example.com".into()),
            password: Some("plain".into()),
            ..Default::default()
        };

        let creds =
            resolve_credentials_with(&profile, "p", lookup(&[(ENV_PASSWORD, "global")])).unwrap();

        let Credentials::UsernamePassword { password, .. } = creds else {
            panic!("expected username/password");
        };
        assert_eq!(password.expose_secret(), "global");
    }

    #[test]
    fn username_without_password_is_an_error() {
        let profile = Profile {
            username: Some("user@example.com".into()),
            ..Default::default()
        };

        let err = resolve_credentials_with(&profile, "work", lookup(&[])).unwrap_err();

        assert!(matches!(err, ConfigError::NoCredentials { profile } if profile == "work"));
    }

    #[test]
    fn global_token_is_the_last_resort() {
        let creds = resolve_credentials_with(
            &Profile::default(),
            "p",
            lookup(&[(ENV_TOKEN, "global-token")]),
        )
        .unwrap();

        assert_eq!(token_of(&creds), "global-token");
    }

    #[test]
    fn nothing_configured() {
        let err = resolve_credentials_with(&Profile::default(), "empty", lookup(&[])).unwrap_err();

        assert_eq!(
            err.to_string(),
            "no credentials configured for profile 'empty'"
        );
    }

    #[test]
    fn client_config_prefers_profile_over_defaults() {
        let defaults = Defaults {
            location: Some("zrh".into()),
            domain: Some("cloudsigma.com".into()),
            insecure: false,
            timeout: Some(30),
        };
        let profile = Profile {
            location: Some("fra".into()),
            timeout: Some(5),
            ..Default::default()
        };

        let config = profile_to_client_config(&profile, &defaults).unwrap();

        assert_eq!(config.location, "fra");
        assert_eq!(config.domain, "cloudsigma.com");
        assert_eq!(config.transport.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.transport.tls, TlsMode::System);
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://fra.cloudsigma.com/api/2.0/"
        );
    }

    #[test]
    fn client_config_tls_modes() {
        let insecure = Profile {
            insecure: Some(true),
            ca_cert: Some("/etc/ca.pem".into()),
            ..Default::default()
        };
        let custom_ca = Profile {
            ca_cert: Some("/etc/ca.pem".into()),
            ..Default::default()
        };

        let defaults = Defaults::default();
        assert_eq!(
            profile_to_client_config(&insecure, &defaults)
                .unwrap()
                .transport
                .tls,
            TlsMode::DangerAcceptInvalid
        );
        assert_eq!(
            profile_to_client_config(&custom_ca, &defaults)
                .unwrap()
                .transport
                .tls,
            TlsMode::CustomCa("/etc/ca.pem".into())
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let profile = Profile {
            timeout: Some(0),
            ..Default::default()
        };

        let err = profile_to_client_config(&profile, &Defaults::default()).unwrap_err();

        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "timeout"));
    }

    #[test]
    fn unknown_profile() {
        let err = Config::default().profile(Some("nope")).unwrap_err();

        assert_eq!(err.to_string(), "invalid profile: no profile named 'nope'");
    }
}
