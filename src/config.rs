//! Static room configuration.
//!
//! Everything the page owner tunes lives here: hotspot table, UI layout,
//! panel texts, timings and the two deployment policies (hotspot gating and
//! what the back control does). Loaded once at startup, never reloaded.

use thiserror::Error;

use crate::room::hotspots::HotspotRegistry;
use crate::room::intro::IntroTiming;
use crate::room::layout::UiLayout;
use crate::room::panels::HotspotGating;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(String),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite number >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("debug key must be a single character, got {0:?}")]
    DebugKey(String),
}

/// Terminal action of the back control.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BackAction {
    /// Reload the current document, rebuilding the room from scratch.
    Reload,
    /// Navigate to another document.
    Navigate(String),
}

impl Default for BackAction {
    fn default() -> Self {
        BackAction::Navigate("index.html".to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PortfolioConfig {
    pub canvas_id: String,
    pub background_src: String,
    pub static_sprite_src: String,
    pub animated_sprite_src: String,
    /// Display scale of the room image, shared by drawing and hit-testing.
    pub background_scale: f64,
    pub timing: IntroTiming,
    pub link_delay_ms: f64,
    pub gating: HotspotGating,
    pub back_action: BackAction,
    /// Keep the speech bubble on screen while the recruiter panel is up.
    pub recruiter_keeps_bubble: bool,
    pub welcome_message: String,
    pub recruiter_message: String,
    pub explore_prompt: String,
    pub debug_key: String,
    pub hotspots: HotspotRegistry,
    pub layout: UiLayout,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            canvas_id: "screenCanvas".to_string(),
            background_src: "img/screen.png".to_string(),
            static_sprite_src: "img/mestatic.png".to_string(),
            animated_sprite_src: "img/megif.gif".to_string(),
            background_scale: 3.0,
            timing: IntroTiming::default(),
            link_delay_ms: 1000.0,
            gating: HotspotGating::default(),
            back_action: BackAction::default(),
            recruiter_keeps_bubble: true,
            welcome_message: "Here is my portfolio: Click on the icons below to explore, and scroll on the page to see more!"
                .to_string(),
            recruiter_message: "If you are interested in knowing more about me, click on the first next button!"
                .to_string(),
            explore_prompt: "Hover over things in my room and click them to learn more!".to_string(),
            debug_key: "d".to_string(),
            hotspots: HotspotRegistry::default(),
            layout: UiLayout::default(),
        }
    }
}

impl PortfolioConfig {
    /// Parse a (partial) JSON override of the defaults and validate it.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject numbers the sequencer or mapper cannot work with. Hotspot
    /// geometry is only warned about: a bad region is just unreachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("backgroundScale", self.background_scale)?;
        positive("timing.slideMs", self.timing.slide_ms)?;
        positive("timing.glitchMs", self.timing.glitch_ms)?;
        non_negative("timing.handoffMs", self.timing.handoff_ms)?;
        non_negative("timing.jitterPx", self.timing.jitter_px)?;
        non_negative("linkDelayMs", self.link_delay_ms)?;
        if self.debug_key.chars().count() != 1 {
            return Err(ConfigError::DebugKey(self.debug_key.clone()));
        }
        for warning in self.hotspot_warnings() {
            log::warn!("{warning}");
        }
        Ok(())
    }

    pub fn hotspot_warnings(&self) -> Vec<String> {
        self.hotspots
            .iter()
            .filter(|h| !h.fits_background())
            .map(|h| format!("hotspot '{}' extends outside the room image", h.name))
            .collect()
    }

    pub fn is_debug_key(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.debug_key)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::hotspots::{Hotspot, HotspotRegistry};

    #[test]
    fn test_default_validates() {
        assert_eq!(PortfolioConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_scale() {
        let cfg = PortfolioConfig { background_scale: 0.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { field: "backgroundScale", .. })));
    }

    #[test]
    fn test_rejects_nan_delay() {
        let cfg = PortfolioConfig { link_delay_ms: f64::NAN, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Negative { field: "linkDelayMs", .. })));
    }

    #[test]
    fn test_rejects_multi_char_debug_key() {
        let cfg = PortfolioConfig { debug_key: "dd".to_string(), ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::DebugKey("dd".to_string())));
    }

    #[test]
    fn test_out_of_bounds_hotspot_only_warns() {
        let cfg = PortfolioConfig {
            hotspots: HotspotRegistry::new(vec![Hotspot::new("edge", 0.9, 0.9, 0.2, 0.2, "off the edge")]),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.hotspot_warnings().len(), 1);
    }

    #[test]
    fn test_debug_key_case_insensitive() {
        let cfg = PortfolioConfig::default();
        assert!(cfg.is_debug_key("d"));
        assert!(cfg.is_debug_key("D"));
        assert!(!cfg.is_debug_key("e"));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_from_json_partial_override() {
        let cfg = PortfolioConfig::from_json(
            r#"{
                "backgroundScale": 9.5,
                "gating": "always",
                "backAction": "reload",
                "hotspots": [
                    { "name": "lamp", "relX": 0.1, "relY": 0.2, "relWidth": 0.05, "relHeight": 0.1,
                      "message": "A lamp", "link": "https://example.com" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.background_scale, 9.5);
        assert_eq!(cfg.gating, HotspotGating::Always);
        assert_eq!(cfg.back_action, BackAction::Reload);
        assert_eq!(cfg.hotspots.len(), 1);
        assert_eq!(cfg.hotspots.by_name("lamp").and_then(|h| h.link.as_deref()), Some("https://example.com"));
        // untouched fields keep their defaults
        assert_eq!(cfg.timing, IntroTiming::default());
        assert_eq!(cfg.debug_key, "d");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_from_json_navigate_action() {
        let cfg = PortfolioConfig::from_json(r#"{ "backAction": { "navigate": "home.html" } }"#).unwrap();
        assert_eq!(cfg.back_action, BackAction::Navigate("home.html".to_string()));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_from_json_errors() {
        assert!(matches!(PortfolioConfig::from_json("{"), Err(ConfigError::Json(_))));
        assert!(matches!(
            PortfolioConfig::from_json(r#"{ "backgroundScale": -1 }"#),
            Err(ConfigError::NotPositive { .. })
        ));
    }
}
