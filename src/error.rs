//! Error types for the SAP replay converter.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no calculator export text provided")]
    EmptyInput,

    #[error("could not find a calculator code in that URL")]
    UrlMissingCode,

    #[error("could not decode the {prefix}: export payload")]
    EnvelopeDecode { prefix: &'static str },

    #[error("input is not a recognized calculator export format")]
    UnrecognizedFormat,

    #[error("could not find player/opponent team data in the calculator export")]
    MissingTeams,

    #[error("could not load calculator maps from {path}: {message}")]
    MapsLoad { path: String, message: String },
}
