use serde_json::Value;

/// Placeholder written in `createdAt`; the store replaces it with its own
/// clock when committing the record. Serializes as `{".sv": "timestamp"}`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ServerTimestamp {
    #[serde(rename = ".sv")]
    sentinel: Sentinel,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
enum Sentinel {
    #[default]
    Timestamp,
}

impl ServerTimestamp {
    pub fn matches(v: &Value) -> bool {
        serde_json::from_value::<ServerTimestamp>(v.clone()).is_ok()
    }
}
