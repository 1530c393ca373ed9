//! Configuration loading for the benefits allocation engine.
//!
//! This module loads the program metadata (name, currency names, default
//! distribution) and the dated role-template sets from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use benefits_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded program: {}", config.program().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ProgramConfig, ProgramMetadata, TemplateAmounts, TemplateSet, TemplateSetFile};
