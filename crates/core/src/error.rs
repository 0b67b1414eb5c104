//! Recoverable failure outcomes for grid extraction and path queries.
//! None of these are faults: a navigation consumer is expected to fall back
//! to straight-line movement when it receives one.

use std::fmt;

use thiserror::Error;

use crate::types::Cell;

/// Which end of a path query an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("no walkability map available")]
    NoMapAvailable,
    #[error("{endpoint} cell {cell} lies outside the walkability grid")]
    OutOfBounds { endpoint: Endpoint, cell: Cell },
    #[error("{endpoint} cell {cell} is not walkable")]
    Unwalkable { endpoint: Endpoint, cell: Cell },
    #[error("no path from {start} to {target}")]
    NoPathFound { start: Cell, target: Cell },
    #[error("cannot extract a walkability grid from an empty floor set")]
    EmptyFloorSet,
}
