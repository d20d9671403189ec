use thiserror::Error;

#[derive(Error, Debug)]
pub enum CohortError {
    #[error("invalid ISO-8601 period '{0}'")]
    InvalidPeriod(String),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("datetime arithmetic overflow")]
    TimeOverflow,
}
