use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;

use crate::{Error, Path};

/// Full snapshots of a subscribed path, `None` when nothing is stored there.
/// Dropping the stream releases the listener.
pub type SnapshotStream = Pin<Box<dyn Send + Stream<Item = Result<Option<Value>, Error>>>>;

/// Pure function from the current value of a slot to its next value. It can be
/// called several times for a single transaction.
pub type Transform<'a> = &'a (dyn Sync + Fn(Option<Value>) -> Option<Value>);

/// The realtime JSON-tree store all board state lives in
#[async_trait]
pub trait Store {
    /// Yields the current value of `path` right away, then again after every
    /// change below it
    async fn subscribe(&self, path: &Path) -> Result<SnapshotStream, Error>;

    /// Adds `record` as a new child of `path` and returns the key the store
    /// picked. Server timestamp placeholders in `record` are resolved.
    async fn append(&self, path: &Path, record: Value) -> Result<String, Error>;

    /// Atomically replaces the value at `path` with `f(current)`, retrying on
    /// concurrent writes. `None` removes the value. Returns what got committed.
    async fn transform_atomically(&self, path: &Path, f: Transform<'_>)
        -> Result<Option<Value>, Error>;
}
