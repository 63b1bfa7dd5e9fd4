use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::GateParams;
use crate::errors::{Result, VaultError};

/// Minimum safe gate memory cost in KiB (8 MB).
const MIN_GATE_MEMORY_KIB: u32 = 8_192;

/// Project-level configuration, loaded from `passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.  There are no silent fallbacks the
/// other way, though: a present-but-invalid value (unparseable file,
/// dangerously weak work factors) is a startup-time fatal error, never
/// something to quietly substitute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the vault database file.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Argon2 memory cost in KiB for secret hashing (default: 19 MB).
    #[serde(default = "default_gate_memory_kib")]
    pub gate_memory_kib: u32,

    /// Argon2 iteration count for secret hashing (default: 2).
    #[serde(default = "default_gate_iterations")]
    pub gate_iterations: u32,

    /// Argon2 parallelism degree for secret hashing (default: 1).
    #[serde(default = "default_gate_parallelism")]
    pub gate_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_db_path() -> String {
    "passvault.db".to_string()
}

fn default_gate_memory_kib() -> u32 {
    19_456 // 19 MB
}

fn default_gate_iterations() -> u32 {
    2
}

fn default_gate_parallelism() -> u32 {
    1
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            gate_memory_kib: default_gate_memory_kib(),
            gate_iterations: default_gate_iterations(),
            gate_parallelism: default_gate_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = "passvault.toml";

    /// Load settings from `<dir>/passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.  If the
    /// file exists but cannot be parsed or carries unsafe values, an error
    /// is returned — startup refuses rather than papering over it.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations that would weaken the secret hashes.
    pub fn validate(&self) -> Result<()> {
        if self.gate_memory_kib < MIN_GATE_MEMORY_KIB {
            return Err(VaultError::ConfigError(format!(
                "gate_memory_kib must be at least {MIN_GATE_MEMORY_KIB} (got {})",
                self.gate_memory_kib
            )));
        }
        if self.gate_iterations < 1 {
            return Err(VaultError::ConfigError(
                "gate_iterations must be at least 1".into(),
            ));
        }
        if self.gate_parallelism < 1 {
            return Err(VaultError::ConfigError(
                "gate_parallelism must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Convert the gate settings into crypto-layer params.
    pub fn gate_params(&self) -> GateParams {
        GateParams {
            memory_kib: self.gate_memory_kib,
            iterations: self.gate_iterations,
            parallelism: self.gate_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
