use thiserror::Error;

/// Errors raised while building or querying the difficulty catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no difficulty is configured for a {0} second round")]
    UnknownDuration(u32),

    #[error("difficulty catalog is empty")]
    EmptyCatalog,

    #[error("difficulty for {0} seconds is configured more than once")]
    DuplicateDuration(u32),

    #[error("round duration must be positive")]
    ZeroDuration,

    #[error(
        "thresholds for {duration} seconds must satisfy 0 < bronze < silver < gold \
         (got {bronze}/{silver}/{gold})"
    )]
    InvalidThresholds {
        duration: u32,
        bronze: u32,
        silver: u32,
        gold: u32,
    },
}
