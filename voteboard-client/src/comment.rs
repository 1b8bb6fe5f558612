use crate::api::{ClientId, CommentId, Stance, Time};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub stance: Stance,
    pub author: String,
    pub author_id: Option<ClientId>,

    /// Server timestamp, or the time of normalization if it was unusable
    pub created_at: Time,
}
