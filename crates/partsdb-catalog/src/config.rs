use serde::{Deserialize, Serialize};
use std::fmt;

///
/// AdminPassword
///
/// The shared secret gating update and delete mutations. Always injected
/// through [`CatalogConfig`]; never read from ambient process state inside
/// validation logic. Debug output is redacted.
///

#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct AdminPassword(String);

impl AdminPassword {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// True when the supplied candidate matches the configured secret.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminPassword(..)")
    }
}

///
/// CatalogConfig
///
/// Configuration handed to the orchestrator at construction time.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub admin_password: AdminPassword,

    /// Whether item creation requires an uploaded image.
    #[serde(default = "default_require_item_image")]
    pub require_item_image: bool,
}

impl CatalogConfig {
    pub fn new(admin_password: AdminPassword) -> Self {
        Self {
            admin_password,
            require_item_image: default_require_item_image(),
        }
    }
}

const fn default_require_item_image() -> bool {
    true
}

///
/// TESTS
///
