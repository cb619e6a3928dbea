use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("profile has {profile} entries but the path has {path} segments")]
    ProfileMismatch { path: usize, profile: usize },

    #[error("configuration error: {0}")]
    Config(#[from] sd_core::CoreError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
