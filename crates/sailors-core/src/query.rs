//! ============================================================================
//! Query Service - Row retrieval from the hosted database
//! ============================================================================
//! The backend is a PostgREST-style table API. Callers describe what they
//! want with a [`TableQuery`] and receive rows as JSON values; the typed
//! helper [`fetch_records`] decodes them into model structs.
//!
//! Services receive the query handle explicitly (`Arc<dyn QueryService>`),
//! so tests substitute an in-memory implementation.
//! ============================================================================

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SailorsError};

/// Select/limit/filter description of a table read
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub table: String,
    pub columns: String,
    pub limit: Option<usize>,
    /// (column, value) equality filters
    pub filters: Vec<(String, String)>,
}

impl TableQuery {
    /// Read all columns of `table`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            limit: None,
            filters: Vec::new(),
        }
    }

    /// Column list, including embedded resources such as `anomaly(id, content)`
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }

    /// Query-string parameters in PostgREST syntax
    pub fn params(&self) -> Vec<(String, String)> {
        let columns: String = self.columns.chars().filter(|c| !c.is_whitespace()).collect();
        let mut params = vec![("select".to_string(), columns)];
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{}", value)));
        }
        params
    }
}

/// Remote collection reads
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Fetch the rows matching `query` as raw JSON values
    async fn fetch_rows(&self, query: &TableQuery) -> Result<Vec<Value>>;
}

/// Fetch rows and decode each one into `T`
pub async fn fetch_records<T: DeserializeOwned>(
    service: &dyn QueryService,
    query: &TableQuery,
) -> Result<Vec<T>> {
    let rows = service.fetch_rows(query).await?;
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| SailorsError::Decode(format!("{} row: {}", query.table, e)))
        })
        .collect()
}

/// [`QueryService`] over HTTP against `{base_url}/rest/v1/{table}`
pub struct RestQueryService {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestQueryService {
    /// Anonymous access with the project's public API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: None,
        }
    }

    /// Authenticate requests as a signed-in user
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait]
impl QueryService for RestQueryService {
    async fn fetch_rows(&self, query: &TableQuery) -> Result<Vec<Value>> {
        let url = self.table_url(&query.table);
        debug!("GET {} ({:?})", url, query.params());

        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SailorsError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Value> = serde_json::from_str(&body)
            .map_err(|e| SailorsError::Decode(format!("{} response: {}", query.table, e)))?;
        debug!("{} returned {} rows", query.table, rows.len());
        Ok(rows)
    }
}
