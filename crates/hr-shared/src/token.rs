use secrecy::{ExposeSecret as _, SecretString};

/// Opaque bearer token issued by the backend on login. The contents are never
/// inspected by the client
#[derive(Clone, serde::Deserialize)]
#[serde(transparent)]
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(SecretString::from(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for AuthToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("is_empty", &self.is_empty())
            .finish()
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AuthToken {}
