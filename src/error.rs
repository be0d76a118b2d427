use std::num::ParseIntError;
use thiserror::Error;

use crate::adjust::Field;

#[derive(Error, Debug)]
pub enum ElgatoError {
    #[error("could not parse value {input:?}: {source}")]
    ParseError {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{field} needs to be between {min} and {max}, was: {got}")]
    OutOfBounds {
        field: Field,
        min: i64,
        max: i64,
        got: i64,
    },

    #[error("could not encode request: {0}")]
    EncodeError(#[source] serde_json::Error),

    #[error("could not build request: {0}")]
    RequestBuildError(#[source] reqwest::Error),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error("could not read response body: {0}")]
    BodyReadError(#[source] reqwest::Error),

    #[error("could not decode response: {0}")]
    DecodeError(#[source] serde_json::Error),

    #[error("device reported no lights")]
    NoLights,

    #[error("device reported unknown power state {0}")]
    InvalidState(i64),
}

pub type Result<T> = std::result::Result<T, ElgatoError>;
