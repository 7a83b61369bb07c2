pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::console::{ScriptedConsole, TerminalConsole};
pub use adapters::storage::LocalStorage;
pub use config::FarmConfig;
pub use core::{farm::Farm, persistence::CsvPersistence, session::Session};
pub use utils::error::{FarmError, Result};
