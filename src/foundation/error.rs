pub type FxResult<T> = Result<T, FxError>;

#[derive(thiserror::Error, Debug)]
pub enum FxError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("resample error: {0}")]
    Resample(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn resample(msg: impl Into<String>) -> Self {
        Self::Resample(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
