use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The C heap could not satisfy the request.
    #[error("heap exhausted: could not allocate {size} bytes aligned to {align}")]
    AllocationFailed { size: usize, align: usize },

    #[error("cell at {address:#x} was read before any value was written")]
    Uninitialized { address: usize },

    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
