//! Core types and configuration for imagegen.
//!
//! This crate defines the `public.json` variant manifest ([`VariantManifest`]),
//! the `matrix.toml` selector configuration ([`MatrixConfig`]), and shared
//! error types.

pub mod config;
pub mod error;
pub mod manifest;

pub use config::{MatrixConfig, PlatformConfig};
pub use error::{Error, Result};
pub use manifest::{VariantManifest, VariantSpec};
