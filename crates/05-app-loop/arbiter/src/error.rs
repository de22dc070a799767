use thiserror::Error;

pub type ArbiterResult<T> = Result<T, ArbiterError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArbiterError {
    #[error("request lifetime must be at least one tick (got {ticks})")]
    InvalidDuration { ticks: u32 },

    #[error("invalid arbiter configuration: {0}")]
    InvalidConfig(&'static str),
}
