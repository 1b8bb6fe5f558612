use chrono::Utc;

mod client;
pub use client::ClientId;

mod comment;
pub use comment::{CommentId, NewComment, Stance};

mod error;
pub use error::Error;

mod path;
pub use path::Path;

mod store;
pub use store::{SnapshotStream, Store, Transform};

mod suggestion;
pub use suggestion::{NewSuggestion, SuggestionId};

mod timestamp;
pub use timestamp::ServerTimestamp;

mod vote;
pub use vote::{as_integer, Vote};

pub type Time = chrono::DateTime<Utc>;

// The store accepts any unicode, but null bytes break most consumers of the
// exported tree, so reject them before they get written
pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

/// Validates user-provided free text: no null bytes, and not only whitespace
pub fn validate_text(s: &str) -> Result<(), Error> {
    validate_string(s)?;
    match s.trim().is_empty() {
        true => Err(Error::EmptyText),
        false => Ok(()),
    }
}
