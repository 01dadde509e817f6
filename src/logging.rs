//! `log` facade routed to the browser console.

use log::Level;

/// Install the console logger. Safe to call more than once: later calls only
/// adjust the level.
pub fn init(level: Level) {
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(level);
    log::set_max_level(level.to_level_filter());
}
