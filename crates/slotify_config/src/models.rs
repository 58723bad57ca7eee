// --- File: crates/slotify_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the daily rolling log file. Console only when unset.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/slotify.db, overridable via SLOTIFY__DATABASE__URL
    #[serde(default)]
    pub max_connections: Option<u32>,
}

// --- Google Calendar Config ---
// OAuth client credentials used to refresh organizer tokens.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>, // usually "secret_from_env"
    pub time_zone: Option<String>,
    /// Passed to the events.insert `sendUpdates` parameter ("all", "externalOnly", "none").
    pub send_updates: Option<String>,
}

// --- Alert policy ---

/// Alert severity tier.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown severity '{}', expected one of low, medium, high, critical",
            self.0
        )
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// How one severity tier is handled.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityPolicy {
    #[serde(alias = "auto_schedule")]
    pub auto_schedule: bool,
    /// Meeting length in minutes.
    #[serde(alias = "meeting_duration")]
    pub meeting_duration: i64,
    #[serde(default, alias = "required_departments")]
    pub required_departments: Vec<String>,
    #[serde(default, alias = "emergency_override")]
    pub emergency_override: bool,
}

impl SeverityPolicy {
    fn new(auto_schedule: bool, meeting_duration: i64, emergency_override: bool, departments: &[&str]) -> Self {
        Self {
            auto_schedule,
            meeting_duration,
            required_departments: departments.iter().map(|d| d.to_string()).collect(),
            emergency_override,
        }
    }
}

/// One `SeverityPolicy` per tier.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPolicy {
    pub low: SeverityPolicy,
    pub medium: SeverityPolicy,
    pub high: SeverityPolicy,
    pub critical: SeverityPolicy,
}

impl AlertPolicy {
    pub fn tier(&self, severity: Severity) -> &SeverityPolicy {
        match severity {
            Severity::Low => &self.low,
            Severity::Medium => &self.medium,
            Severity::High => &self.high,
            Severity::Critical => &self.critical,
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            low: SeverityPolicy::new(false, 30, false, &["operations"]),
            medium: SeverityPolicy::new(true, 45, false, &["operations", "emergency_management"]),
            high: SeverityPolicy::new(
                true,
                60,
                false,
                &["operations", "emergency_management", "public_safety"],
            ),
            critical: SeverityPolicy::new(
                true,
                90,
                true,
                &["operations", "emergency_management", "public_safety", "executive"],
            ),
        }
    }
}

// --- ChainSync Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ChainsyncConfig {
    /// Recorded as `scheduledBy` on every meeting. Defaults to "system".
    #[serde(default)]
    pub scheduled_by: Option<String>,
    /// Fallback for alert types without a stored policy.
    #[serde(default)]
    pub default_policy: Option<AlertPolicy>,
    #[serde(default)]
    pub meeting_list_limit: Option<i64>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    // Falls back to 127.0.0.1:8086
    #[serde(default)]
    pub server: ServerConfig,

    /// "production" hides internal error details from API responses.
    #[serde(default)]
    pub environment: Option<String>,

    #[serde(default)]
    pub logging: Option<LoggingConfig>,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_chainsync: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub chainsync: Option<ChainsyncConfig>,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment
            .as_deref()
            .is_some_and(|env| env.eq_ignore_ascii_case("production"))
    }

    /// The configured fallback policy, or the built-in one.
    pub fn default_alert_policy(&self) -> AlertPolicy {
        self.chainsync
            .as_ref()
            .and_then(|c| c.default_policy.clone())
            .unwrap_or_default()
    }
}
