use std::collections::HashMap;

use crate::{
    api::{ClientId, Error, NewComment, NewSuggestion, Path, Stance, Store, SuggestionId, Vote},
    FeedUpdate, Identity, Suggestion,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    /// The live feed is gone, stays until the session ends
    Persistent,

    /// A write failed, the user may try again
    Transient,

    /// The user needs to do something first
    Guidance,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: &str) -> Notice {
        Notice {
            kind,
            message: String::from(message),
        }
    }
}

/// What happened to a user action
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The store accepted the write
    Committed,

    /// Nothing to do, eg. the text was blank
    Ignored,

    /// Refused before reaching the store, see the board's notice
    Rejected,

    /// The store refused the write, see the board's notice
    Failed,
}

/// State of one session of the board: who we are, the latest normalized
/// snapshot, and the last error to show.
#[derive(Debug)]
pub struct Board {
    identity: Identity,
    display_name: Option<String>,
    suggestions: Vec<Suggestion>,
    error: Option<Notice>,
}

impl Board {
    pub fn new(identity: Identity) -> Board {
        Board {
            identity,
            display_name: None,
            suggestions: Vec::new(),
            error: None,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        self.identity.client_id()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns `false` and keeps the current name if `name` is blank
    pub fn set_display_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.display_name = Some(String::from(name));
        true
    }

    /// Sorted by score then recency
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn suggestion(&self, id: &SuggestionId) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == *id)
    }

    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn apply(&mut self, update: FeedUpdate) {
        match update {
            FeedUpdate::Snapshot(suggestions) => self.suggestions = suggestions,
            FeedUpdate::Failed(_) => self.notify(
                NoticeKind::Persistent,
                "Unable to load suggestions. Please verify your store configuration.",
            ),
        }
    }

    /// Our vote on each known suggestion: 1, -1, or 0 for none
    pub fn vote_map(&self) -> HashMap<SuggestionId, i64> {
        self.suggestions
            .iter()
            .map(|s| (s.id.clone(), self.vote_value(s)))
            .collect()
    }

    pub fn current_vote(&self, id: &SuggestionId) -> i64 {
        self.suggestion(id).map(|s| self.vote_value(s)).unwrap_or(0)
    }

    pub fn is_self(&self, suggestion: &Suggestion) -> bool {
        suggestion.is_authored_by(self.client_id())
    }

    pub async fn submit_suggestion<S>(&mut self, store: &S, text: &str) -> Outcome
    where
        S: ?Sized + Sync + Store,
    {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }
        let Some(author) = self.require_name(
            "Please enter your display name before submitting suggestions.",
        ) else {
            return Outcome::Rejected;
        };

        self.clear_error();
        let record = NewSuggestion::new(String::from(text), author, self.client_id().clone());
        let res = match record.validate().and_then(|()| Ok(serde_json::to_value(&record)?)) {
            Ok(record) => store.append(&Path::suggestions(), record).await,
            Err(err) => Err(err),
        };
        match res {
            Ok(key) => {
                tracing::info!(suggestion = %key, "submitted suggestion");
                Outcome::Committed
            }
            Err(err) => self.write_failed(
                err,
                "failed to submit suggestion",
                "Unable to submit suggestion. Please try again later.",
            ),
        }
    }

    pub async fn cast_vote<S>(&mut self, store: &S, id: &SuggestionId, vote: Vote) -> Outcome
    where
        S: ?Sized + Sync + Store,
    {
        if self
            .require_name("Please enter your display name before voting.")
            .is_none()
        {
            return Outcome::Rejected;
        }

        match crate::cast_vote(store, id, self.client_id(), vote).await {
            Ok(_) => Outcome::Committed,
            Err(err) => self.write_failed(
                err,
                "failed to register vote",
                "Unable to register your vote. Please retry.",
            ),
        }
    }

    pub async fn add_comment<S>(
        &mut self,
        store: &S,
        id: &SuggestionId,
        text: &str,
        stance: Stance,
    ) -> Outcome
    where
        S: ?Sized + Sync + Store,
    {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }
        let Some(author) =
            self.require_name("Please enter your display name before commenting.")
        else {
            return Outcome::Rejected;
        };

        let record = NewComment::new(String::from(text), stance, author, self.client_id().clone());
        let prepared = record.validate().and_then(|()| -> Result<_, Error> {
            Ok((Path::comments(id)?, serde_json::to_value(&record)?))
        });
        let res = match prepared {
            Ok((path, record)) => store.append(&path, record).await,
            Err(err) => Err(err),
        };
        match res {
            Ok(key) => {
                tracing::info!(suggestion = %id, comment = %key, "added comment");
                Outcome::Committed
            }
            Err(err) => self.write_failed(
                err,
                "failed to add comment",
                "Unable to add your comment. Please retry.",
            ),
        }
    }
}

impl Board {
    fn vote_value(&self, s: &Suggestion) -> i64 {
        s.current_vote(self.client_id()).map(Vote::value).unwrap_or(0)
    }

    fn notify(&mut self, kind: NoticeKind, message: &str) {
        self.error = Some(Notice::new(kind, message));
    }

    /// Display name to write with, or a guidance notice if there is none yet
    fn require_name(&mut self, guidance: &str) -> Option<String> {
        match self.display_name.clone() {
            Some(name) => Some(name),
            None => {
                self.notify(NoticeKind::Guidance, guidance);
                None
            }
        }
    }

    fn write_failed(&mut self, err: Error, log: &str, message: &str) -> Outcome {
        tracing::error!(?err, "{log}");
        self.notify(NoticeKind::Transient, message);
        Outcome::Failed
    }
}
