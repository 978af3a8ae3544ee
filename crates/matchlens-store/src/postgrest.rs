//! PostgREST (Supabase) record store

use crate::client::{HttpClientConfig, RetryPolicy, create_client, with_retry};
use crate::{Result, StoreError};
use async_trait::async_trait;
use chrono::SecondsFormat;
use matchlens_core::record::{RESULT_DRAW, RESULT_ERROR};
use matchlens_core::{MatchRecord, OutcomeConstraint, RecordQuery, RecordStore};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, instrument, warn};

/// Table written by the match runner
pub const DEFAULT_TABLE: &str = "ai_chess_match_data";

/// PostgREST connector configuration
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`
    pub base_url: String,

    /// Anon or service key, sent as both `apikey` and bearer token
    pub api_key: String,

    /// Table holding the match records
    pub table: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,

    /// Readiness check policy used by `connect`
    pub readiness: RetryPolicy,
}

impl PostgrestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            client_config: HttpClientConfig::default(),
            readiness: RetryPolicy::default(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_readiness(mut self, readiness: RetryPolicy) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn with_client_config(mut self, client_config: HttpClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(StoreError::ConfigError("store URL is empty".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(StoreError::ConfigError("store API key is empty".to_string()));
        }
        if self.table.trim().is_empty() {
            return Err(StoreError::ConfigError("table name is empty".to_string()));
        }
        Ok(())
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

/// Quote a filter value when it contains PostgREST reserved characters
fn filter_value(value: &str) -> String {
    let reserved = |c: char| matches!(c, ',' | '(' | ')' | ':' | '"' | '\\') || c.is_whitespace();
    if value.contains(reserved) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}

/// Encode a query as PostgREST URL parameters
pub fn query_params(query: &RecordQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];

    if let Some(since) = query.since {
        params.push((
            "date",
            format!("gte.{}", since.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ));
    }

    if let Some(model) = query.model.as_deref() {
        let model = filter_value(model);
        params.push((
            "or",
            format!("(white_model.eq.{model},black_model.eq.{model})"),
        ));
    }

    match query.outcome {
        OutcomeConstraint::Any => {}
        OutcomeConstraint::Decisive => {
            params.push(("result", format!("not.eq.{}", RESULT_DRAW)));
            params.push(("result", format!("not.eq.{}", RESULT_ERROR)));
        }
        OutcomeConstraint::Draw => {
            params.push(("result", format!("eq.{}", RESULT_DRAW)));
        }
    }

    params.push(("order", "date.desc".to_string()));
    params
}

trait SupabaseAuth {
    fn supabase_auth(self, config: &PostgrestConfig) -> Self;
}

impl SupabaseAuth for RequestBuilder {
    fn supabase_auth(self, config: &PostgrestConfig) -> Self {
        self.header("apikey", &config.api_key)
            .header("Authorization", format!("Bearer {}", config.api_key))
            .header("Accept", "application/json")
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());
    Err(StoreError::QueryError {
        status_code: status.as_u16(),
        message,
    })
}

/// Match table served by PostgREST
pub struct PostgrestStore {
    config: PostgrestConfig,
    client: Client,
}

impl PostgrestStore {
    /// Create a connector without contacting the store
    pub fn new(config: PostgrestConfig) -> Result<Self> {
        config.validate()?;
        let client = create_client(&config.client_config)?;
        Ok(Self { config, client })
    }

    /// Create a connector and wait until the table answers
    ///
    /// The check is retried according to `config.readiness`; once it gives
    /// up the store is reported as not ready.
    pub async fn connect(config: PostgrestConfig) -> Result<Self> {
        let store = Self::new(config)?;
        let policy = store.config.readiness;

        with_retry(policy, || store.check_ready()).await.map_err(|e| {
            warn!("Record store at {} is not ready: {}", store.config.base_url, e);
            StoreError::NotReady {
                attempts: policy.max_attempts.max(1),
                message: e.to_string(),
            }
        })?;

        info!(
            "Connected to record store {} (table {})",
            store.config.base_url, store.config.table
        );
        Ok(store)
    }

    pub fn config(&self) -> &PostgrestConfig {
        &self.config
    }

    /// Cheapest request that proves the table is reachable and readable
    async fn check_ready(&self) -> Result<()> {
        let response = self
            .client
            .get(self.config.table_url())
            .supabase_auth(&self.config)
            .query(&[("select", "date"), ("limit", "1")])
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(table = %self.config.table))]
    async fn fetch_rows(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>> {
        let params = query_params(query);
        debug!("Querying record store with {:?}", params);

        let response = self
            .client
            .get(self.config.table_url())
            .supabase_auth(&self.config)
            .query(&params)
            .send()
            .await?;
        let response = check_status(response).await?;

        let body = response.bytes().await?;
        let records: Vec<MatchRecord> = serde_json::from_slice(&body)?;

        if records.is_empty() {
            // An empty 200 usually means row level security hides the table
            warn!(
                "Record store returned no rows for table {}; check row level security and table permissions",
                self.config.table
            );
        } else {
            debug!("Fetched {} match records", records.len());
        }

        Ok(records)
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn fetch(&self, query: &RecordQuery) -> matchlens_core::Result<Vec<MatchRecord>> {
        Ok(self.fetch_rows(query).await?)
    }

    fn describe(&self) -> String {
        format!("postgrest:{}/{}", self.config.base_url, self.config.table)
    }
}
