use anyhow::anyhow;

/// Connection settings for the hosted store, all of them required
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub database_url: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

const VARS: [&str; 7] = [
    "VOTEBOARD_API_KEY",
    "VOTEBOARD_AUTH_DOMAIN",
    "VOTEBOARD_DATABASE_URL",
    "VOTEBOARD_PROJECT_ID",
    "VOTEBOARD_STORAGE_BUCKET",
    "VOTEBOARD_MESSAGING_SENDER_ID",
    "VOTEBOARD_APP_ID",
];

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<StoreConfig> {
        StoreConfig::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads every variable through `lookup`. Missing and empty variables are
    /// all reported together in the error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<StoreConfig> {
        let values = VARS.map(|var| lookup(var).filter(|v| !v.trim().is_empty()));
        let missing = VARS
            .iter()
            .zip(values.iter())
            .filter(|(_, v)| v.is_none())
            .map(|(var, _)| *var)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(anyhow!(
                "Missing store environment variables: {}.",
                missing.join(", ")
            ));
        }
        let [
            api_key,
            auth_domain,
            database_url,
            project_id,
            storage_bucket,
            messaging_sender_id,
            app_id,
        ] = values.map(Option::unwrap_or_default);
        tracing::debug!(%project_id, %database_url, "loaded store configuration");
        Ok(StoreConfig {
            api_key,
            auth_domain,
            database_url,
            project_id,
            storage_bucket,
            messaging_sender_id,
            app_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_env() -> HashMap<&'static str, String> {
        VARS.iter()
            .map(|v| (*v, format!("value of {v}")))
            .collect()
    }

    #[test]
    fn loads_complete_config() {
        let env = full_env();
        let cfg = StoreConfig::from_lookup(|v| env.get(v).cloned()).unwrap();
        assert_eq!(cfg.database_url, "value of VOTEBOARD_DATABASE_URL");
        assert_eq!(cfg.app_id, "value of VOTEBOARD_APP_ID");
    }

    #[test]
    fn lists_every_missing_variable() {
        let mut env = full_env();
        env.remove("VOTEBOARD_API_KEY");
        env.insert("VOTEBOARD_APP_ID", String::from("  "));
        let err = StoreConfig::from_lookup(|v| env.get(v).cloned()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing store environment variables: VOTEBOARD_API_KEY, VOTEBOARD_APP_ID."
        );
    }
}
