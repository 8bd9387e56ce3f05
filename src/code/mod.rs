//! Code generation module
//!
//! This module handles:
//! - Building the payload text from identifier, date and role tag (content.rs)
//! - Encoding the payload into a square QR bitmap (encoder.rs)

pub mod content;
pub mod encoder;

pub use content::{CodeFormatter, DateProvider, LocalDate};
pub use encoder::{EncodingError, QrEncoder, SquareImage, SymbolEncoder};
