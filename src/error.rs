use std::time::Duration;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// The driver connection string could not be parsed.
    #[error("invalid connection string `{dsn}`: {reason}")]
    Dsn { dsn: String, reason: &'static str },

    #[error("invalid schemaless config: {0}")]
    Config(String),

    #[error("unknown timestamp precision `{0}`")]
    Precision(String),

    /// The payload was rejected before anything was sent.
    #[error("invalid {protocol} payload: {reason}")]
    Payload {
        protocol: &'static str,
        reason: String,
    },

    #[error("request {req_id:#x} timed out after {elapsed:?}")]
    Timeout { req_id: u64, elapsed: Duration },

    #[error("connecting to {endpoint} timed out after {elapsed:?}")]
    ConnectTimeout { endpoint: String, elapsed: Duration },

    #[error("schemaless client is closed")]
    Closed,

    /// Errors raised inside the taos driver.
    #[error("{context}: {source}")]
    Driver {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn driver<E>(context: &'static str) -> impl FnOnce(E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        move |err| Error::Driver {
            context,
            source: Box::new(err),
        }
    }
}
