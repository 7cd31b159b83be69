use serde::{Deserialize, Serialize};

use super::defaults;

/// Privacy subsystem configuration. Redaction itself is always on; only the
/// audit record is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Emit the unredacted text on the audit target.
    pub audit_log: bool,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            audit_log: defaults::DEFAULT_AUDIT_LOG,
        }
    }
}
