pub mod config;
pub mod core;
pub mod domain;
pub mod feed;
pub mod map;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{engine::MapEngine, pipeline::QuakePipeline};
pub use map::MapContext;
pub use utils::error::{QuakeMapError, Result};
