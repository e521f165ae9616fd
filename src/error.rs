//! Error types.
//!
//! Construction of a [`Value`](crate::value::Value) either succeeds completely
//! or returns a [`ValueError`]. Scaling never fails; degenerate ranges have
//! defined fallbacks (see [`scale`](crate::scale)).

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

use crate::table::ElementHandle;

/// Failure to interpret raw sample bytes as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The declared report size cannot be decoded into an `i64`.
    #[error("unsupported {} sample width of {bits} bits", signedness(.signed))]
    UnsupportedWidth { bits: u8, signed: bool },
}

fn signedness(signed: &bool) -> &'static str {
    if *signed {
        "signed"
    } else {
        "unsigned"
    }
}

/// Failure to construct a [`Value`](crate::value::Value).
#[derive(Debug, Error)]
pub enum ValueError {
    /// The handle does not (or no longer does) name an element in the table.
    #[error("element {0} is not present in the element table")]
    UnknownElement(ElementHandle),

    /// No buffer was supplied but a non-zero length was requested.
    #[error("no buffer supplied for a sample of {length} bytes")]
    NullBuffer { length: usize },

    /// The requested length runs past the end of the supplied buffer.
    #[error("sample length {length} exceeds the {available}-byte buffer")]
    LengthOutOfBounds { length: usize, available: usize },

    /// The sample buffer could not be allocated.
    #[error("failed to allocate {length} bytes for a sample buffer")]
    Allocation {
        length: usize,
        #[source]
        source: TryReserveError,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// An element description that cannot produce meaningful values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementError {
    #[error(transparent)]
    Format(#[from] DecodeError),

    #[error("logical minimum {min} is greater than logical maximum {max}")]
    InvertedLogicalRange { min: i64, max: i64 },

    #[error("granularity must be positive and finite, got {0}")]
    InvalidGranularity(f64),
}

/// Failure to load an element profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read element profile {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognised element profile format for {0} (expected .toml or .json)")]
    UnknownFormat(PathBuf),

    #[error("invalid TOML element profile")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to serialise element profile")]
    TomlSer(#[from] toml::ser::Error),

    #[error("invalid JSON element profile")]
    Json(#[from] serde_json::Error),

    #[error("element #{index} is invalid")]
    InvalidElement {
        index: usize,
        #[source]
        source: ElementError,
    },
}
