// src/core/mod.rs

pub mod converter;
pub mod decoder;
pub mod detector;
pub mod engine;
pub mod tables;
pub mod types;
