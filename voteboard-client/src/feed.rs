use std::mem;

use futures::StreamExt;

use crate::{
    api::{Error, Path, SnapshotStream, Store},
    normalize_now, Suggestion,
};

#[derive(Clone, Debug, PartialEq)]
pub enum FeedUpdate {
    /// The whole board, as of the latest snapshot
    Snapshot(Vec<Suggestion>),

    /// The subscription is gone for good, nothing will follow
    Failed(Error),
}

enum State {
    Live(SnapshotStream),
    Failed(Error),
    Done,
}

/// Live subscription to the `suggestions` tree. The store-side listener is
/// released when the feed is dropped, or after it reported a failure.
pub struct Feed {
    state: State,
}

impl Feed {
    pub async fn subscribe<S>(store: &S) -> Feed
    where
        S: ?Sized + Sync + Store,
    {
        let state = match store.subscribe(&Path::suggestions()).await {
            Ok(stream) => {
                tracing::info!("subscribed to suggestions");
                State::Live(stream)
            }
            Err(err) => State::Failed(err),
        };
        Feed { state }
    }

    /// Waits for the next snapshot and normalizes it. Returns `None` once the
    /// feed has terminated.
    ///
    /// Cancel-safe: dropping the returned future before it completes leaves
    /// the subscription live.
    pub async fn next(&mut self) -> Option<FeedUpdate> {
        if let State::Live(stream) = &mut self.state {
            let err = match stream.next().await {
                Some(Ok(raw)) => return Some(FeedUpdate::Snapshot(normalize_now(raw.as_ref()))),
                Some(Err(err)) => err,
                None => Error::Unreachable(String::from("subscription closed by the store")),
            };
            tracing::error!(?err, "failed to load suggestions");
            self.state = State::Done;
            return Some(FeedUpdate::Failed(err));
        }
        match mem::replace(&mut self.state, State::Done) {
            State::Failed(err) => {
                tracing::error!(?err, "failed to subscribe to suggestions");
                Some(FeedUpdate::Failed(err))
            }
            State::Live(_) | State::Done => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, State::Live(_))
    }

    /// Releases the listener
    pub fn unsubscribe(self) {}
}

impl Drop for Feed {
    fn drop(&mut self) {
        if self.is_live() {
            tracing::info!("unsubscribed from suggestions");
        }
    }
}
