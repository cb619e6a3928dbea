use sd_core::AnchorId;
use sd_mobility::MobilityError;
use sd_rail::RailError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SidingError {
    #[error("rail length must be positive and finite, got {0}")]
    InvalidRailLength(f32),

    #[error("composition for {got} delivered to siding {expected}")]
    WrongSiding { expected: AnchorId, got: AnchorId },

    #[error("stale composition for {siding}: computed at depot generation {computed}, siding is at {current}")]
    StaleComposition {
        siding:   AnchorId,
        computed: u64,
        current:  u64,
    },

    #[error("route mailbox closed")]
    MailboxClosed,

    #[error("path data error: {0}")]
    Rail(#[from] RailError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),
}

pub type SidingResult<T> = Result<T, SidingError>;
