#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod blocks;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;
pub mod template;

pub use config::Config;
pub use error::{ConfigError, StoreError};
