use std::fmt;

use crate::{ClientId, Error, SuggestionId};

pub const SUGGESTIONS: &str = "suggestions";

// Characters the store refuses inside a key
const FORBIDDEN_KEY_CHARS: &[char] = &['.', '$', '#', '[', ']', '/'];

/// Location of a node in the store's JSON tree
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Path(Vec<String>);

impl Path {
    pub fn parse(s: &str) -> Result<Path, Error> {
        let mut res = Path(Vec::new());
        for seg in s.split('/').filter(|seg| !seg.is_empty()) {
            res = res.child(seg)?;
        }
        Ok(res)
    }

    pub fn root() -> Path {
        Path(Vec::new())
    }

    pub fn suggestions() -> Path {
        Path(vec![String::from(SUGGESTIONS)])
    }

    pub fn suggestion(id: &SuggestionId) -> Result<Path, Error> {
        Path::suggestions().child(&id.0)
    }

    pub fn votes(id: &SuggestionId, client: &ClientId) -> Result<Path, Error> {
        Path::suggestion(id)?.child("votes")?.child(client.as_str())
    }

    pub fn comments(id: &SuggestionId) -> Result<Path, Error> {
        Path::suggestion(id)?.child("comments")
    }

    pub fn child(&self, key: &str) -> Result<Path, Error> {
        if key.is_empty() || key.contains(FORBIDDEN_KEY_CHARS) {
            return Err(Error::InvalidPath(format!("{self}/{key}")));
        }
        crate::validate_string(key)?;
        let mut segs = self.0.clone();
        segs.push(String::from(key));
        Ok(Path(segs))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s as &str)
    }

    /// Whether `self` is `other` or one of its ancestors
    pub fn contains(&self, other: &Path) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Whether a write at `self` changes the data visible at `other`
    pub fn overlaps(&self, other: &Path) -> bool {
        self.contains(other) || other.contains(self)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.join("/"))
    }
}
