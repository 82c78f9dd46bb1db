//! Error types with rich diagnostics using miette.
//!
//! These guard the crate's boundaries only: decoding a provider payload and
//! validating a chart configuration. Nothing in the render path itself
//! errors - a degraded chart is always drawn instead (missing or malformed
//! elements are skipped).

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Payload Errors
// ============================================================================

/// Errors decoding a provider payload document.
#[derive(Error, Diagnostic, Debug)]
pub enum PayloadError {
    #[error("malformed chart payload: {message}")]
    #[diagnostic(
        code(radix::payload::malformed),
        help("the payload must be a JSON document matching the ephemeris provider contract")
    )]
    Malformed {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid here")]
        span: SourceSpan,
    },
}

impl PayloadError {
    /// Build a `Malformed` error from a serde_json failure, converting its
    /// 1-based line/column into a byte offset for the span label.
    pub(crate) fn from_json_error(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(source, err.line(), err.column());
        PayloadError::Malformed {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from(offset),
        }
    }
}

/// Byte offset of a 1-based (line, column) position, clamped to the source.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, l) in source.split('\n').enumerate() {
        if idx + 1 == line {
            return (offset + column.saturating_sub(1)).min(source.len());
        }
        offset += l.len() + 1;
    }
    source.len()
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors validating a [`ChartConfig`](crate::config::ChartConfig).
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("radius `{name}` is not a positive finite value: {value}")]
    #[diagnostic(code(radix::config::invalid_radius))]
    InvalidRadius { name: &'static str, value: f64 },

    #[error("radii out of order: inner {inner} must be smaller than outer {outer}")]
    #[diagnostic(code(radix::config::radii_out_of_order))]
    RadiiOutOfOrder { inner: f64, outer: f64 },

    #[error("drawing surface size is not a positive finite value: {size}")]
    #[diagnostic(code(radix::config::invalid_size))]
    InvalidSize { size: f64 },

    #[error("unsupported track count: {tracks}")]
    #[diagnostic(
        code(radix::config::unsupported_tracks),
        help("the collision resolver staggers bodies across 3 or 4 concentric tracks")
    )]
    UnsupportedTracks { tracks: u8 },

    #[error("collision threshold is not a positive finite value: {threshold}")]
    #[diagnostic(code(radix::config::invalid_threshold))]
    InvalidThreshold { threshold: f64 },
}
