// src/lib.rs

pub mod c_api;
pub mod codemix;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod persistence;

pub use crate::core::converter::encode;
pub use crate::core::decoder::decode;
pub use crate::core::detector::detect;
pub use crate::core::engine::TransliterationEngine;
pub use crate::core::types::{Direction, Script};
pub use crate::error::{LipiError, Result};
