//! Feature flag handling for the Slotify application.
//!
//! Features are switched in two places:
//!
//! 1. at compile time with cargo features (`gcal`, `openapi`, ...)
//! 2. at runtime with `use_*` flags plus the matching config section
//!
//! The helpers here cover the runtime half.
//!
//! - `gcal`: Google Calendar provisioning for scheduled meetings
//! - `chainsync`: alert intake and emergency meeting scheduling

use slotify_config::AppConfig;
use std::sync::Arc;

/// A feature is on when its flag is set and its config section exists.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Google Calendar needs the `[gcal]` section for OAuth client credentials.
#[cfg(feature = "gcal")]
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_gcal, config.gcal.as_ref())
}

/// ChainSync persists everything, so it needs a database.
#[cfg(feature = "chainsync")]
pub fn is_chainsync_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_chainsync, config.database.as_ref())
}
