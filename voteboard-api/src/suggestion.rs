use std::fmt;

use crate::{ClientId, Error, ServerTimestamp};

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct SuggestionId(pub String);

impl From<&str> for SuggestionId {
    fn from(s: &str) -> SuggestionId {
        SuggestionId(String::from(s))
    }
}

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record appended under `suggestions` when a user posts an idea
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSuggestion {
    pub text: String,
    pub author: String,
    pub author_id: ClientId,
    pub created_at: ServerTimestamp,
}

impl NewSuggestion {
    pub fn new(text: String, author: String, author_id: ClientId) -> NewSuggestion {
        NewSuggestion {
            text,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_store_field_names() {
        let s = NewSuggestion::new(
            String::from("Add coffee machine"),
            String::from("Ana"),
            ClientId::from("c1"),
        );
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            serde_json::json!({
                "text": "Add coffee machine",
                "author": "Ana",
                "authorId": "c1",
                "createdAt": { ".sv": "timestamp" },
            })
        );
    }

    #[test]
    fn rejects_blank_text() {
        let s = NewSuggestion::new(String::from("  \n"), String::from("Ana"), ClientId::from("c1"));
        assert_eq!(s.validate(), Err(Error::EmptyText));
    }
}
