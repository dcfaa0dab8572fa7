use std::{fmt, sync::OnceLock};

use chrono::Utc;
use uuid::Uuid;

const RANDOM_DIGITS_MODULUS: u128 = 10_000_000_000_000_000;

/// Opaque per-process token correlating requests on the server. Not a secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// `<unix millis><16 random digits>`.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let random = Uuid::new_v4().as_u128() % RANDOM_DIGITS_MODULUS;
        Self(format!("{millis}{random:016}"))
    }

    /// Token for this process, created on first use.
    pub fn current() -> &'static SessionToken {
        static CURRENT: OnceLock<SessionToken> = OnceLock::new();
        CURRENT.get_or_init(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}
