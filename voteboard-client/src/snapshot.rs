//! Turns the raw `suggestions` tree pushed by the store into the sorted list
//! the board displays.
//!
//! The store enforces no schema, so any field may be missing or hold anything.
//! Normalization never fails: unusable fields fall back to empty strings, no
//! votes, no comments, or the normalization time for timestamps. Each snapshot
//! is normalized from scratch, there is no diffing against the previous one.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::{
    api::{self, ClientId, CommentId, Stance, SuggestionId, Time},
    sort_comments, sort_suggestions, Comment, Suggestion,
};

pub fn normalize_now(raw: Option<&Value>) -> Vec<Suggestion> {
    normalize(raw, Utc::now())
}

/// Normalizes a full snapshot of `suggestions`. `now` is used for every
/// timestamp that cannot be read, so two normalizations of the same malformed
/// record at different times may order it differently.
pub fn normalize(raw: Option<&Value>, now: Time) -> Vec<Suggestion> {
    let mut n = Normalizer { now, fallbacks: 0 };
    let mut res = children(raw)
        .into_iter()
        .map(|(id, s)| n.suggestion(id, s))
        .collect::<Vec<_>>();
    sort_suggestions(&mut res);
    tracing::debug!(num_suggestions = res.len(), "normalized snapshot");
    if n.fallbacks > 0 {
        tracing::warn!(
            num_fallbacks = n.fallbacks,
            "snapshot had malformed fields, substituted defaults"
        );
    }
    res
}

struct Normalizer {
    now: Time,
    fallbacks: usize,
}

impl Normalizer {
    fn suggestion(&mut self, id: String, raw: &Value) -> Suggestion {
        let fields = raw.as_object();
        if fields.is_none() {
            self.fallbacks += 1;
        }
        let get = |k: &str| fields.and_then(|f| f.get(k));

        let votes = self.votes(get("votes"));
        let score = votes.values().fold(0i64, |acc, v| acc.saturating_add(*v));
        let mut comments = children(get("comments"))
            .into_iter()
            .map(|(id, c)| self.comment(id, c))
            .collect::<Vec<_>>();
        sort_comments(&mut comments);

        Suggestion {
            id: SuggestionId(id),
            text: string(get("text")),
            author: string(get("author")),
            author_id: client_id(get("authorId")),
            created_at: self.time(get("createdAt")),
            votes,
            score,
            comments,
        }
    }

    fn comment(&mut self, id: String, raw: &Value) -> Comment {
        let fields = raw.as_object();
        if fields.is_none() {
            self.fallbacks += 1;
        }
        let get = |k: &str| fields.and_then(|f| f.get(k));

        let stance = match get("stance").and_then(Value::as_str).and_then(Stance::parse) {
            Some(s) => s,
            None => {
                self.fallbacks += 1;
                Stance::Neutral
            }
        };
        Comment {
            id: CommentId(id),
            text: string(get("text")),
            stance,
            author: string(get("author")),
            author_id: client_id(get("authorId")),
            created_at: self.time(get("createdAt")),
        }
    }

    fn votes(&mut self, raw: Option<&Value>) -> BTreeMap<ClientId, i64> {
        children(raw)
            .into_iter()
            .filter_map(|(client, vote)| match api::as_integer(vote) {
                Some(v) => Some((ClientId(client), v)),
                None => {
                    self.fallbacks += 1;
                    None
                }
            })
            .collect()
    }

    fn time(&mut self, raw: Option<&Value>) -> Time {
        let millis = raw.and_then(|v| {
            v.as_i64().or_else(|| {
                v.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
        });
        match millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
            Some(t) => t,
            None => {
                self.fallbacks += 1;
                self.now
            }
        }
    }
}

/// Children of a node in the store's enumeration order. The store hands out
/// arrays for nodes whose keys all look like indices, with holes as nulls.
fn children(raw: Option<&Value>) -> Vec<(String, &Value)> {
    match raw {
        Some(Value::Object(o)) => o.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Some(Value::Array(a)) => a
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn string(raw: Option<&Value>) -> String {
    raw.and_then(Value::as_str).map(String::from).unwrap_or_default()
}

fn client_id(raw: Option<&Value>) -> Option<ClientId> {
    raw.and_then(Value::as_str).map(ClientId::from)
}
