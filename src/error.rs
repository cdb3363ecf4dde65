use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at byte {offset}: {source}")]
    Parse {
        offset: usize,
        #[source]
        source: RecordError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Why a single `<station>;<temperature>` record could not be read.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing ';' delimiter")]
    MissingDelimiter,

    #[error("temperature is truncated")]
    Truncated,

    #[error("temperature does not match -?D.D or -?DD.D")]
    MalformedTemperature,

    #[error("expected line terminator after temperature")]
    MissingTerminator,
}

impl ProcessingError {
    pub fn parse(offset: usize, source: RecordError) -> Self {
        ProcessingError::Parse { offset, source }
    }
}
