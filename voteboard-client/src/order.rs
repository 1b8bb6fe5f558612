use std::cmp::Reverse;

use crate::{Comment, Suggestion};

/// Highest score first, newest first among equal scores. Ties on both keep
/// their current relative order.
pub fn sort_suggestions(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(|s| (Reverse(s.score), Reverse(s.created_at)))
}

/// Newest first, ties keep their current relative order
pub fn sort_comments(comments: &mut [Comment]) {
    comments.sort_by_key(|c| Reverse(c.created_at))
}
