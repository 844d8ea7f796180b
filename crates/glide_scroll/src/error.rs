//! Scroll engine error types

use std::path::PathBuf;

use thiserror::Error;

use crate::host::ElementId;

/// Errors raised by the scroll runtime's API surface
///
/// Degenerate geometry and timing never produce errors; they are clamped.
#[derive(Error, Debug)]
pub enum ScrollError {
    /// The region handle was destroyed or never existed
    #[error("unknown scroll region")]
    UnknownRegion,

    /// The element already backs a scroll region
    #[error("element {0:?} is already a scroll region")]
    AlreadyAttached(ElementId),

    /// The viewport element has no content child to translate
    #[error("element {0:?} has no content child")]
    MissingContent(ElementId),

    /// A policy value is out of range
    #[error("invalid scroll policy: {0}")]
    InvalidPolicy(String),

    /// The host reported neither touch nor mouse input
    #[error("no pointer input source available")]
    NoPointerInput,

    /// Policy file could not be read
    #[error("failed to read scroll policy {}: {source}", path.display())]
    PolicyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Policy file could not be parsed
    #[error("failed to parse scroll policy: {0}")]
    PolicyParse(#[from] toml::de::Error),

    /// Policy could not be serialized
    #[error("failed to serialize scroll policy: {0}")]
    PolicySerialize(#[from] toml::ser::Error),
}

/// Result type for scroll operations
pub type Result<T> = std::result::Result<T, ScrollError>;
