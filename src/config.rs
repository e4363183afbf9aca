//! Page wiring for the bootstrap.
//!
//! Defaults match the page the bootstrap was written for; a page can
//! override them through an embedded JSON block (see `ignition_web`).

use serde::{Deserialize, Serialize};

use crate::error::LaunchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Id of the clickable control that starts the sequence.
    pub trigger_id: String,
    /// Id of the pre-activation content region removed on click.
    pub placeholder_id: String,
    /// URL of the application module's JS glue, relative to the page.
    pub module_url: String,
    /// Entry export invoked once the module is initialised.
    pub entry: String,
    /// Legacy names the entry was exported under in older module builds.
    /// Tried in order when `entry` is absent; using one is reported as a
    /// warning rather than accepted silently.
    pub entry_fallbacks: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            trigger_id: "button-start".to_string(),
            placeholder_id: "main".to_string(),
            module_url: "./pkg/wasm.js".to_string(),
            entry: "main".to_string(),
            entry_fallbacks: vec!["run_game".to_string()],
        }
    }
}

impl LaunchConfig {
    /// Parse an embedded JSON config block. Unknown fields are rejected so
    /// a typo fails loudly instead of silently falling back to a default.
    pub fn from_json(text: &str) -> Result<Self, LaunchError> {
        serde_json::from_str(text).map_err(|e| LaunchError::Config(e.to_string()))
    }

    /// Entry export names in resolution order: `entry` first, then the
    /// legacy fallbacks.
    pub fn entry_candidates(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.entry.as_str())
            .chain(self.entry_fallbacks.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_page() {
        let cfg = LaunchConfig::default();
        assert_eq!(cfg.trigger_id, "button-start");
        assert_eq!(cfg.placeholder_id, "main");
        assert_eq!(cfg.module_url, "./pkg/wasm.js");
        assert_eq!(cfg.entry, "main");
        assert_eq!(cfg.entry_fallbacks, vec!["run_game".to_string()]);
    }

    #[test]
    fn json_overrides_merge_over_defaults() {
        let cfg = LaunchConfig::from_json(
            r#"{ "module_url": "./pkg/app.js", "entry": "run_game" }"#,
        )
        .unwrap();
        assert_eq!(cfg.module_url, "./pkg/app.js");
        assert_eq!(cfg.entry, "run_game");
        // Untouched fields keep their defaults.
        assert_eq!(cfg.trigger_id, "button-start");
        assert_eq!(cfg.placeholder_id, "main");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = LaunchConfig::from_json(r#"{ "modul_url": "./pkg/app.js" }"#).unwrap_err();
        assert!(matches!(err, LaunchError::Config(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LaunchConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn entry_candidates_keep_resolution_order() {
        let cfg = LaunchConfig::default();
        let names: Vec<&str> = cfg.entry_candidates().collect();
        assert_eq!(names, vec!["main", "run_game"]);
    }
}
