#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Store unreachable: {0}")]
    Unreachable(String),

    #[error("Transaction aborted after too many conflicting writes")]
    TransactionAborted,

    #[error("Invalid store path {0:?}")]
    InvalidPath(String),

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Text must not be empty")]
    EmptyText,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Unknown(format!("serializing record: {err}"))
    }
}
