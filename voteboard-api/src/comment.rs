use std::fmt;

use crate::{ClientId, Error, ServerTimestamp};

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl From<&str> for CommentId {
    fn from(s: &str) -> CommentId {
        CommentId(String::from(s))
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Pro,
    Con,
    Neutral,
}

impl Stance {
    pub const ALL: [Stance; 3] = [Stance::Pro, Stance::Con, Stance::Neutral];

    /// Parses the stored representation, `None` for anything unknown
    pub fn parse(s: &str) -> Option<Stance> {
        match s {
            "pro" => Some(Stance::Pro),
            "con" => Some(Stance::Con),
            "neutral" => Some(Stance::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Pro => "pro",
            Stance::Con => "con",
            Stance::Neutral => "neutral",
        }
    }
}

/// Record appended under `suggestions/{id}/comments`
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub text: String,
    pub stance: Stance,
    pub author: String,
    pub author_id: ClientId,
    pub created_at: ServerTimestamp,
}

impl NewComment {
    pub fn new(text: String, stance: Stance, author: String, author_id: ClientId) -> NewComment {
        NewComment {
            text,
            stance,
            author,
            author_id,
            created_at: ServerTimestamp::default(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_text(&self.text)?;
        crate::validate_string(&self.author)?;
        crate::validate_string(self.author_id.as_str())
    }
}
