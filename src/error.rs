use thiserror::Error;

use crate::ir::Axis;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Invalid parameter(s) in set {set}: {}", .names.join(", "))]
    InvalidParameter { set: usize, names: Vec<String> },

    #[error("Axis conflict in set {set}: cutplane and cutline cannot both be on {axis}")]
    AxisConflict { set: usize, axis: Axis },

    #[error("Malformed TDR code '{0}': expected one or two digits")]
    MalformedTdrCode(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
