//! Presentation layer
//!
//! Views are plain functions from screen state to iced elements; they never
//! mutate state, they only emit `Message`s.

pub mod display;
pub mod input;
pub mod links;
pub mod overlay;
