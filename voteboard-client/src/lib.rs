mod board;
pub use board::{Board, Notice, NoticeKind, Outcome};

mod comment;
pub use comment::Comment;

mod config;
pub use config::StoreConfig;

mod display;
pub use display::format_relative;

mod feed;
pub use feed::{Feed, FeedUpdate};

mod identity;
pub use identity::Identity;

mod order;
pub use order::{sort_comments, sort_suggestions};

mod snapshot;
pub use snapshot::{normalize, normalize_now};

mod suggestion;
pub use suggestion::Suggestion;

mod vote;
pub use vote::{cast_vote, toggle_slot};

pub mod api {
    pub use voteboard_api::*;
}
