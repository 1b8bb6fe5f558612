use serde_json::Value;

use crate::api::{ClientId, Error, Path, Store, SuggestionId, Vote};

/// Next raw value of a vote slot when `cast` is clicked. A slot holding
/// something unreadable counts as no vote and gets overwritten.
pub fn toggle_slot(current: Option<&Value>, cast: Vote) -> Option<Value> {
    Vote::toggle(current.and_then(Vote::from_json), cast).map(Vote::to_json)
}

/// Toggles `client`'s vote on `suggestion` in a single transaction on its vote
/// slot, and returns the vote the store committed. Nothing is applied locally,
/// the change shows up with the next snapshot.
pub async fn cast_vote<S>(
    store: &S,
    suggestion: &SuggestionId,
    client: &ClientId,
    cast: Vote,
) -> Result<Option<Vote>, Error>
where
    S: ?Sized + Sync + Store,
{
    let path = Path::votes(suggestion, client)?;
    let toggle = move |current: Option<Value>| toggle_slot(current.as_ref(), cast);
    let committed = store.transform_atomically(&path, &toggle).await?;
    let res = committed.as_ref().and_then(Vote::from_json);
    tracing::debug!(%suggestion, %client, ?cast, committed = ?res, "cast vote");
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_vote_is_written() {
        assert_eq!(toggle_slot(None, Vote::Up), Some(json!(1)));
        assert_eq!(toggle_slot(None, Vote::Down), Some(json!(-1)));
    }

    #[test]
    fn same_vote_clears_slot() {
        assert_eq!(toggle_slot(Some(&json!(1)), Vote::Up), None);
        assert_eq!(toggle_slot(Some(&json!(-1)), Vote::Down), None);
    }

    #[test]
    fn opposite_vote_switches_directly() {
        assert_eq!(toggle_slot(Some(&json!(1)), Vote::Down), Some(json!(-1)));
        assert_eq!(toggle_slot(Some(&json!(-1)), Vote::Up), Some(json!(1)));
    }

    #[test]
    fn garbage_slot_is_overwritten() {
        assert_eq!(toggle_slot(Some(&json!("up")), Vote::Up), Some(json!(1)));
        assert_eq!(toggle_slot(Some(&json!(7)), Vote::Down), Some(json!(-1)));
    }

    #[test]
    fn toggle_is_pure_under_retry() {
        bolero::check!()
            .with_type::<(Option<i8>, Vote)>()
            .cloned()
            .for_each(|(slot, cast)| {
                let slot = slot.map(|v| json!(v));
                let first = toggle_slot(slot.as_ref(), cast);
                let again = toggle_slot(slot.as_ref(), cast);
                assert_eq!(first, again);
                // committed value is always absent or the cast vote
                assert!(first.is_none() || first == Some(cast.to_json()));
            });
    }
}
