use std::collections::BTreeMap;

use crate::{
    api::{ClientId, SuggestionId, Time, Vote},
    Comment,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub text: String,
    pub author: String,
    pub author_id: Option<ClientId>,

    /// Server timestamp, or the time of normalization if it was unusable
    pub created_at: Time,

    /// Integer vote values per client; non-integer entries are already dropped
    pub votes: BTreeMap<ClientId, i64>,

    /// Sum of `votes`
    pub score: i64,

    /// Newest first
    pub comments: Vec<Comment>,
}

impl Suggestion {
    /// Vote `client` currently holds on this suggestion. Stored values other
    /// than ±1 count as no vote.
    pub fn current_vote(&self, client: &ClientId) -> Option<Vote> {
        self.votes.get(client).copied().and_then(Vote::from_value)
    }

    pub fn is_authored_by(&self, client: &ClientId) -> bool {
        self.author_id.as_ref() == Some(client)
    }
}
