//! Core types for the navlink crate.
//!
//! This module provides the building blocks used throughout the library:
//!
//! - [`types`] - The wire data model (`ScanRequest`, `NavigationResponse`, ...)
//! - [`geometry`] - Path geometry and its invariants
//! - [`catalog`] - The static navigation catalog
//! - [`error`] - Structured error types

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod types;

// Re-export commonly used types at the core level
pub use catalog::{Catalog, PathAxis, ZoneProfile};
pub use error::{RetrievalError, RetrievalResult};
pub use geometry::{ClampBounds, ImageDimensions, PathGeometry, Point};
pub use types::{
    Destination, Navigation, NavigationResponse, ResponseMetadata, ResponseSource, ScanRequest,
    ScannedLocation,
};
