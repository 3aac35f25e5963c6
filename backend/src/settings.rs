//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from `MENTORSHIP_*` environment variables and configuration
//! files. Command-line flags of the binary are parsed separately by the CLI.

use std::fmt;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::Role;

fn default_seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("mentors.json")
}

/// Connection, session and seed settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MENTORSHIP")]
pub struct MentorshipSettings {
    /// PostgreSQL URL. Without one the in-process store is used.
    pub database_url: Option<String>,
    /// Maximum pooled PostgreSQL connections.
    pub pool_max_size: Option<u32>,
    /// Bearer token issued by the identity provider.
    pub access_token: Option<String>,
    /// Signed-in account id.
    pub account_id: Option<String>,
    /// Role claim of the signed-in account.
    pub role: Option<String>,
    /// Mentor profiles loaded into the in-process store.
    pub seed_path: Option<PathBuf>,
}

impl MentorshipSettings {
    /// Role claim, defaulting to candidate.
    pub fn role(&self) -> Role {
        Role::from_claim(self.role.as_deref())
    }

    /// Seed file, defaulting to the bundled fixture.
    pub fn seed_path(&self) -> PathBuf {
        self.seed_path.clone().unwrap_or_else(default_seed_path)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl fmt::Debug for MentorshipSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("MentorshipSettings")
            .field("database_url", &redact(&self.database_url))
            .field("pool_max_size", &self.pool_max_size)
            .field("access_token", &redact(&self.access_token))
            .field("account_id", &self.account_id)
            .field("role", &self.role)
            .field("seed_path", &self.seed_path)
            .finish()
    }
}
