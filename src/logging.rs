//! Console logging through `console_log`.

use log::{Level, LevelFilter};

/// Installs the console logger once; later calls only adjust the level.
pub fn init(level: LevelFilter) {
    if console_log::init_with_level(Level::Trace).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}

