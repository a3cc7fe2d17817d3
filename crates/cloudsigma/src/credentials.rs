// Credential model and providers.
//
// The client asks its provider for credentials once per outgoing request,
// so a provider backed by rotating storage takes effect on the next call.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Which authentication scheme a set of credentials uses.
///
/// Derived from the [`Credentials`] variant, so it always matches the
/// populated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialsSource {
    /// HTTP Basic auth with the account email and password.
    UsernamePassword,
    /// `Authorization: Bearer` access token.
    Token,
}

impl CredentialsSource {
    /// Stable name of the source, as reported in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::UsernamePassword => "UsernamePasswordCredentials",
            Self::Token => "TokenCredentials",
        }
    }
}

impl fmt::Display for CredentialsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Credentials for authenticating with the CloudSigma API.
///
/// Each variant carries the secret material needed for its auth flow.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Basic auth. `username` is the account email address.
    UsernamePassword {
        username: String,
        password: SecretString,
    },
    /// Bearer access token.
    Token(SecretString),
}

impl Credentials {
    pub fn username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::UsernamePassword {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(SecretString::from(token.into()))
    }

    pub fn source(&self) -> CredentialsSource {
        match self {
            Self::UsernamePassword { .. } => CredentialsSource::UsernamePassword,
            Self::Token(_) => CredentialsSource::Token,
        }
    }

    /// Check that every field required by the variant is non-empty.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::UsernamePassword { username, password } => {
                if username.is_empty() {
                    return Err(Error::Credentials {
                        reason: "username must not be empty".into(),
                    });
                }
                if password.expose_secret().is_empty() {
                    return Err(Error::Credentials {
                        reason: "password must not be empty".into(),
                    });
                }
                Ok(())
            }
            Self::Token(token) => {
                if token.expose_secret().is_empty() {
                    return Err(Error::Credentials {
                        reason: "token must not be empty".into(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// Anything that can hand out credentials on demand.
///
/// Called exactly once per request and never cached by the client.
pub trait CredentialsProvider: fmt::Debug + Send + Sync {
    fn retrieve(&self) -> Result<Credentials, Error>;
}

/// Provider for a fixed account email and password.
#[derive(Debug, Clone)]
pub struct UsernamePasswordCredentialsProvider {
    username: String,
    password: SecretString,
}

impl UsernamePasswordCredentialsProvider {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn from_secret(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl CredentialsProvider for UsernamePasswordCredentialsProvider {
    fn retrieve(&self) -> Result<Credentials, Error> {
        let creds = Credentials::UsernamePassword {
            username: self.username.clone(),
            password: self.password.clone(),
        };
        creds.validate()?;
        Ok(creds)
    }
}

/// Provider for a fixed bearer token.
#[derive(Debug, Clone)]
pub struct TokenCredentialsProvider {
    token: SecretString,
}

impl TokenCredentialsProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    pub fn from_secret(token: SecretString) -> Self {
        Self { token }
    }
}

impl CredentialsProvider for TokenCredentialsProvider {
    fn retrieve(&self) -> Result<Credentials, Error> {
        let creds = Credentials::Token(self.token.clone());
        creds.validate()?;
        Ok(creds)
    }
}

impl CredentialsProvider for Credentials {
    fn retrieve(&self) -> Result<Credentials, Error> {
        self.validate()?;
        Ok(self.clone())
    }
}
