use sd_core::{AnchorId, CoreError};
use sd_siding::SidingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("siding {0} added twice")]
    DuplicateSiding(AnchorId),

    #[error("siding error: {0}")]
    Siding(#[from] SidingError),
}

pub type SimResult<T> = Result<T, SimError>;
