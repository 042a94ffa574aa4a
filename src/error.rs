use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("no input image given")]
    MissingArgument,

    #[error("path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("unknown error while checking {path}")]
    UnknownStat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error opening file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error decoding image header")]
    DecodeConfig(#[source] image::ImageError),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("error seeking image")]
    Seek(#[source] std::io::Error),

    #[error("error decoding image")]
    Decode(#[source] image::ImageError),

    #[error("error creating file {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error encoding image")]
    Encode(#[source] image::ImageError),
}
