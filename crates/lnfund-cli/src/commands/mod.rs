pub mod config;
pub mod scan;

pub use config::{handle_config_command, ConfigCommand};
pub use scan::{run_scan, ScanArgs};
