//! Console logging for the browser build.

use log::{Level, LevelFilter};

/// Install `console_log` (first call wins) and set the max level.
///
/// Every canvas calls this; later canvases only change the level.
pub fn init(level: LevelFilter) {
    // Already installed by an earlier canvas: only the level changes.
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(install_level(level));
    log::set_max_level(level);
}

/// `console_log` wants a concrete `Level`; `Off` still installs the backend
/// and the max level filter silences it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn install_level(level: LevelFilter) -> Level {
    level.to_level().unwrap_or(Level::Error)
}
