//! Room Portfolio core crate.
//!
//! A pixel-art bedroom drawn on a canvas: the character slides in and glitches
//! into its animated sprite, then a short panel sequence (welcome, recruiter,
//! explore) hands over to clickable hotspots in the room. `start_portfolio()`
//! boots the default room; `start_portfolio_with_config()` takes JSON
//! overrides for the hotspot table, layout, texts and policies.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod logging;
pub mod room;

pub use config::{BackAction, ConfigError, PortfolioConfig};
pub use room::hotspots::{Hotspot, HotspotRegistry};
pub use room::panels::{HotspotGating, PanelButton, PanelPhase};
pub use room::router::{Cursor, HitTarget, RouteResult};
pub use room::{Host, RoomState};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::Level::Info);
}

#[wasm_bindgen]
pub fn start_portfolio() -> Result<(), JsValue> {
    room::start_room(PortfolioConfig::default())
}

/// Start with a JSON override of the default config (camelCase keys).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_portfolio_with_config(json: &str) -> Result<(), JsValue> {
    let config = PortfolioConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    room::start_room(config)
}

/// Flip debug logging on or off from the browser console.
#[wasm_bindgen]
pub fn set_verbose_logging(verbose: bool) {
    log::set_max_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info });
}
