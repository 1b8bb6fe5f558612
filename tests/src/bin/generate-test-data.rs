use anyhow::Context;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde_json::{json, Map, Value};
use voteboard_client::api::{ClientId, Stance, Vote};

const SUGGESTION_WORD_COUNT: usize = 8;
const COMMENT_WORD_COUNT: usize = 15;
const MAX_COMMENTS_PER_SUGGESTION: usize = 6;

// Around the time the board went live, in ms
const FIRST_TIMESTAMP: i64 = 1_700_000_000_000;
const TIMESTAMP_SPREAD: i64 = 30 * 24 * 3600 * 1000;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Number of suggestions to generate
    #[structopt(short, long, default_value = "20")]
    suggestions: usize,

    /// Number of distinct voting clients
    #[structopt(short, long, default_value = "10")]
    clients: usize,

    /// Probability for each field to be replaced by garbage
    #[structopt(short, long, default_value = "0.05")]
    malformed: f64,

    /// Seed, for reproducible output
    #[structopt(long)]
    seed: Option<u64>,
}

struct Gen {
    rng: StdRng,
    malformed: f64,
    next_key: u64,
}

impl Gen {
    fn key(&mut self) -> String {
        self.next_key += 1;
        format!("-K{:016}", self.next_key)
    }

    fn timestamp(&mut self) -> i64 {
        FIRST_TIMESTAMP + self.rng.gen_range(0..TIMESTAMP_SPREAD)
    }

    /// Randomly swaps `v` for something the board must survive
    fn maybe_garbage(&mut self, v: Value) -> Option<Value> {
        if !self.rng.gen_bool(self.malformed) {
            return Some(v);
        }
        match self.rng.gen_range(0..5) {
            0 => None,
            1 => Some(json!("garbage")),
            2 => Some(json!(true)),
            3 => Some(json!({ "nested": [1, 2, 3] })),
            _ => Some(json!(0.5)),
        }
    }

    fn insert(&mut self, obj: &mut Map<String, Value>, key: &str, v: Value) {
        if let Some(v) = self.maybe_garbage(v) {
            obj.insert(String::from(key), v);
        }
    }

    fn author(&mut self, authors: &[(ClientId, String)]) -> (ClientId, String) {
        authors
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| (ClientId::from("anonymous"), String::from("Anonymous")))
    }

    fn comment(&mut self, authors: &[(ClientId, String)]) -> Value {
        let (id, name) = self.author(authors);
        let stance = *Stance::ALL.choose(&mut self.rng).unwrap_or(&Stance::Neutral);
        let mut c = Map::new();
        let text = lipsum::lipsum_words(COMMENT_WORD_COUNT);
        self.insert(&mut c, "text", json!(text));
        self.insert(&mut c, "stance", json!(stance));
        self.insert(&mut c, "author", json!(name));
        self.insert(&mut c, "authorId", json!(id));
        let ts = self.timestamp();
        self.insert(&mut c, "createdAt", json!(ts));
        Value::Object(c)
    }

    fn suggestion(&mut self, authors: &[(ClientId, String)]) -> Value {
        let (id, name) = self.author(authors);
        let mut s = Map::new();
        let text = lipsum::lipsum_words(SUGGESTION_WORD_COUNT);
        self.insert(&mut s, "text", json!(text));
        self.insert(&mut s, "author", json!(name));
        self.insert(&mut s, "authorId", json!(id));
        let ts = self.timestamp();
        self.insert(&mut s, "createdAt", json!(ts));

        let mut votes = Map::new();
        for (client, _) in authors {
            let vote = match self.rng.gen_range(0..3) {
                0 => continue,
                1 => Vote::Up,
                _ => Vote::Down,
            };
            self.insert(&mut votes, client.as_str(), vote.to_json());
        }
        if !votes.is_empty() {
            s.insert(String::from("votes"), Value::Object(votes));
        }

        let mut comments = Map::new();
        for _ in 0..self.rng.gen_range(0..=MAX_COMMENTS_PER_SUGGESTION) {
            let key = self.key();
            let comment = self.comment(authors);
            comments.insert(key, comment);
        }
        if !comments.is_empty() {
            s.insert(String::from("comments"), Value::Object(comments));
        }
        Value::Object(s)
    }
}

/// Prints a random `suggestions` tree on stdout, in the shape the store
/// pushes it, sprinkled with malformed fields
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let opt = <Opt as structopt::StructOpt>::from_args();
    if !(0.0..=1.0).contains(&opt.malformed) {
        anyhow::bail!("--malformed must be between 0 and 1, got {}", opt.malformed);
    }

    let seed = opt.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "generating test data");
    let mut gen = Gen {
        rng: StdRng::seed_from_u64(seed),
        malformed: opt.malformed,
        next_key: 0,
    };

    let authors = (0..opt.clients)
        .map(|i| (ClientId::generate(), format!("user{i}")))
        .collect::<Vec<_>>();
    let mut root = Map::new();
    for _ in 0..opt.suggestions {
        let key = gen.key();
        let suggestion = gen.suggestion(&authors);
        root.insert(key, suggestion);
    }
    let root = Value::Object(root);

    let board = voteboard_client::normalize_now(Some(&root));
    tracing::info!(
        num_suggestions = board.len(),
        top_score = board.first().map(|s| s.score),
        "generated snapshot normalizes cleanly"
    );

    let out = serde_json::to_string_pretty(&json!({ "suggestions": root }))
        .context("serializing generated snapshot")?;
    println!("{out}");
    Ok(())
}
