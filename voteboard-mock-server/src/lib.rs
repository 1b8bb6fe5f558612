use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use futures::channel::mpsc;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use voteboard_client::api::{Error, Path, ServerTimestamp, SnapshotStream, Store, Transform};

/// Number of attempts a transaction gets before giving up
pub const MAX_TRANSACTION_ATTEMPTS: usize = 25;

/// In-memory stand-in for the hosted realtime store. Clones share the same
/// tree, like several clients connected to one database.
#[derive(Clone, Debug)]
pub struct MockStore(Arc<Mutex<Inner>>);

#[derive(Debug)]
struct Inner {
    root: Value,
    feeds: Vec<Listener>,
    next_key: u64,
    clock: i64,

    // failure injection
    deny_subscriptions: bool,
    refuse_subscriptions: Option<Error>,
    fail_writes: bool,
    races: VecDeque<Option<Value>>,
    transform_attempts: usize,
}

#[derive(Debug)]
struct Listener {
    path: Path,
    sender: mpsc::UnboundedSender<Result<Option<Value>, Error>>,
}

impl MockStore {
    pub fn new() -> MockStore {
        MockStore(Arc::new(Mutex::new(Inner {
            root: Value::Object(Map::new()),
            feeds: Vec::new(),
            next_key: 0,
            clock: 1_600_000_000_000,
            deny_subscriptions: false,
            refuse_subscriptions: None,
            fail_writes: false,
            races: VecDeque::new(),
            transform_attempts: 0,
        })))
    }

    /// Writes `value` at `path` bypassing all checks, eg. to plant malformed data
    pub fn admin_set(&self, path: &str, value: Option<Value>) -> Result<(), Error> {
        let path = Path::parse(path)?;
        let mut this = self.0.lock();
        this.write(&path, value);
        Ok(())
    }

    pub fn admin_get(&self, path: &str) -> Result<Option<Value>, Error> {
        let path = Path::parse(path)?;
        Ok(self.0.lock().read(&path))
    }

    /// Refuse new subscriptions with a permission error
    pub fn deny_subscriptions(&self) {
        self.0.lock().deny_subscriptions = true;
    }

    /// Make the subscription call itself return `err`, before any stream exists
    pub fn refuse_subscriptions(&self, err: Error) {
        self.0.lock().refuse_subscriptions = Some(err);
    }

    /// Make appends and transactions fail until turned off again
    pub fn fail_writes(&self, fail: bool) {
        self.0.lock().fail_writes = fail;
    }

    /// Have another client write `value` to the slot of the next transaction
    /// right before it commits, forcing a retry. Queue several to force
    /// several retries.
    pub fn race_next_transform(&self, value: Option<Value>) {
        self.0.lock().races.push_back(value);
    }

    /// Terminates every live subscription with `err`
    pub fn kill_subscriptions(&self, err: Error) {
        let feeds = std::mem::take(&mut self.0.lock().feeds);
        tracing::info!(num_feeds = feeds.len(), ?err, "killing subscriptions");
        for f in feeds {
            let _ = f.sender.unbounded_send(Err(err.clone()));
        }
    }

    /// Ends every live subscription without telling it why
    pub fn close_subscriptions(&self) {
        let feeds = std::mem::take(&mut self.0.lock().feeds);
        tracing::info!(num_feeds = feeds.len(), "closing subscriptions");
    }

    pub fn live_subscriptions(&self) -> usize {
        let mut this = self.0.lock();
        this.feeds.retain(|f| !f.sender.is_closed());
        this.feeds.len()
    }

    /// Number of times transaction functions were called so far
    pub fn transform_attempts(&self) -> usize {
        self.0.lock().transform_attempts
    }
}

impl Default for MockStore {
    fn default() -> MockStore {
        MockStore::new()
    }
}

impl Inner {
    fn read(&self, path: &Path) -> Option<Value> {
        path.segments()
            .try_fold(&self.root, |node, seg| node.get(seg))
            .filter(|v| !v.is_null())
            .cloned()
    }

    fn write(&mut self, path: &Path, value: Option<Value>) {
        let value = value.filter(|v| !v.is_null());
        let segs = path.segments().collect::<Vec<_>>();
        set_in(&mut self.root, &segs, value);
        if !self.root.is_object() {
            self.root = Value::Object(Map::new());
        }
        self.relay(path);
    }

    /// Pushes a fresh snapshot to every listener whose data `written` touched
    fn relay(&mut self, written: &Path) {
        let snapshots = self
            .feeds
            .iter()
            .map(|f| f.path.overlaps(written).then(|| self.read(&f.path)))
            .collect::<Vec<_>>();
        let mut snapshots = snapshots.into_iter();
        self.feeds.retain(|f| match snapshots.next() {
            Some(Some(snap)) => f.sender.unbounded_send(Ok(snap)).is_ok(),
            _ => !f.sender.is_closed(),
        });
    }

    /// Strictly increasing milliseconds
    fn now(&mut self) -> i64 {
        let wall = chrono::Utc::now().timestamp_millis();
        self.clock = wall.max(self.clock + 1);
        self.clock
    }

    fn resolve_timestamps(&mut self, v: &mut Value) {
        if ServerTimestamp::matches(v) {
            *v = Value::from(self.now());
            return;
        }
        match v {
            Value::Object(o) => o.values_mut().for_each(|v| self.resolve_timestamps(v)),
            Value::Array(a) => a.iter_mut().for_each(|v| self.resolve_timestamps(v)),
            _ => (),
        }
    }

    // Zero-padded so that enumeration order is insertion order
    fn new_key(&mut self) -> String {
        self.next_key += 1;
        format!("-K{:016}", self.next_key)
    }
}

fn set_in(node: &mut Value, segs: &[&str], value: Option<Value>) {
    let Some((seg, rest)) = segs.split_first() else {
        *node = value.unwrap_or(Value::Null);
        return;
    };
    if !node.is_object() {
        if value.is_none() {
            return;
        }
        *node = Value::Object(Map::new());
    }
    let Value::Object(children) = node else {
        return;
    };
    match value {
        Some(v) => set_in(
            children.entry(String::from(*seg)).or_insert(Value::Null),
            rest,
            Some(v),
        ),
        None => {
            if let Some(child) = children.get_mut(*seg) {
                set_in(child, rest, None);
                // the store never keeps empty nodes around
                let empty = match child {
                    Value::Null => true,
                    Value::Object(o) => o.is_empty(),
                    _ => false,
                };
                if empty {
                    children.remove(*seg);
                }
            }
        }
    }
}

#[async_trait]
impl Store for MockStore {
    async fn subscribe(&self, path: &Path) -> Result<SnapshotStream, Error> {
        let mut this = self.0.lock();
        if let Some(err) = this.refuse_subscriptions.clone() {
            tracing::info!(%path, ?err, "refusing subscription");
            return Err(err);
        }
        let (sender, receiver) = mpsc::unbounded();
        if this.deny_subscriptions {
            tracing::info!(%path, "denying subscription");
            let _ = sender.unbounded_send(Err(Error::PermissionDenied));
            return Ok(Box::pin(receiver));
        }
        let _ = sender.unbounded_send(Ok(this.read(path)));
        this.feeds.push(Listener {
            path: path.clone(),
            sender,
        });
        Ok(Box::pin(receiver))
    }

    async fn append(&self, path: &Path, mut record: Value) -> Result<String, Error> {
        let mut this = self.0.lock();
        if this.fail_writes {
            return Err(Error::Unreachable(String::from("writes are disabled")));
        }
        let key = this.new_key();
        let child = path.child(&key)?;
        this.resolve_timestamps(&mut record);
        this.write(&child, Some(record));
        Ok(key)
    }

    async fn transform_atomically(
        &self,
        path: &Path,
        f: Transform<'_>,
    ) -> Result<Option<Value>, Error> {
        let mut this = self.0.lock();
        if this.fail_writes {
            return Err(Error::Unreachable(String::from("writes are disabled")));
        }
        for attempt in 0..MAX_TRANSACTION_ATTEMPTS {
            let current = this.read(path);
            this.transform_attempts += 1;
            let next = f(current).filter(|v| !v.is_null());
            if let Some(race) = this.races.pop_front() {
                tracing::debug!(%path, attempt, "transaction lost a race, retrying");
                this.write(path, race);
                continue;
            }
            this.write(path, next.clone());
            return Ok(next);
        }
        tracing::warn!(%path, "transaction aborted after too many attempts");
        Err(Error::TransactionAborted)
    }
}
