//! Error types for the loading phase and the text-submit path.

use std::path::PathBuf;

use thiserror::Error;

use crate::renderer::atlas::Sheet;

/// Failures that can stop the view from reaching its ready state.
///
/// Nothing in the per-frame composition path returns these; once assets are
/// loaded every lookup degrades to a default tile or "no draw".
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sprite sheet '{}' not found in {dir}", .sheet.file_stem())]
    MissingSheet { sheet: Sheet, dir: PathBuf },

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create GPU device: {0}")]
    Device(String),

    #[error("failed to create window surface: {0}")]
    Surface(String),

    #[error("windowing error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, ViewError>;

/// A submitted command string that matched nothing in the active vocabulary.
///
/// The host marks its input widget invalid; no state was changed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognised command '{input}'")]
pub struct InputRejected {
    pub input: String,
}
