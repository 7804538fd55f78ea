pub mod transport;

use crate::error::D1Error;
use crate::result::{ResultSet, Row};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Root of the Cloudflare v4 REST API.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

const UNKNOWN_ERROR: &str = "Unknown error";

/// Account and database identity used for every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account_id: String,
    pub api_token: SecretString,
    pub database_id: String,
}

impl Credentials {
    pub fn new(
        account_id: impl Into<String>,
        api_token: SecretString,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            api_token,
            database_id: database_id.into(),
        }
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    sql: &'a str,
    params: &'a [Value],
}

/// Synchronous D1 query client.
#[derive(Debug)]
pub struct D1Client<T = ReqwestTransport> {
    credentials: Credentials,
    api_base: String,
    transport: T,
}

impl D1Client<ReqwestTransport> {
    /// Client using the default `reqwest` transport with no timeout.
    pub fn new(credentials: Credentials) -> Result<Self, D1Error> {
        Ok(Self::with_transport(credentials, ReqwestTransport::new()?))
    }
}

impl<T: Transport> D1Client<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            transport,
        }
    }

    /// Point the client at a different API root (proxies, local stubs).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Query endpoint for the configured account and database.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/accounts/{}/d1/database/{}/query",
            self.api_base, self.credentials.account_id, self.credentials.database_id
        )
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.credentials.api_token.expose_secret())
    }

    /// Build the POST request for one statement.
    pub fn build_request(&self, sql: &str, params: &[Value]) -> Result<HttpRequest, D1Error> {
        let body = serde_json::to_string(&QueryRequest { sql, params }).map_err(|e| {
            D1Error::Input {
                message: format!("failed to encode query request: {}", e),
            }
        })?;

        Ok(HttpRequest {
            url: self.endpoint(),
            headers: vec![
                ("Authorization".to_string(), self.auth_header()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        })
    }

    /// Run a statement and return the full result set.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<ResultSet, D1Error> {
        let request = self.build_request(sql, params)?;
        tracing::debug!(
            url = %request.url,
            params = params.len(),
            "sending D1 query"
        );

        let start = Instant::now();
        let response = self.transport.send(request)?;
        tracing::debug!(
            status = response.status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "D1 response received"
        );

        let result = parse_response(response)?;
        tracing::debug!(
            rows = result.count(),
            rows_affected = result.affected_rows(),
            "D1 query succeeded"
        );
        Ok(result)
    }

    /// First row, or `None` when the query returned no rows.
    pub fn first(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, D1Error> {
        Ok(self.query(sql, params)?.into_first())
    }

    /// All rows in the order the service returned them.
    pub fn get(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, D1Error> {
        Ok(self.query(sql, params)?.into_rows())
    }

    /// First column of the first row.
    ///
    /// Returns `None` when there is no row or the row has no columns. A
    /// SQL `NULL` in that column comes back as `Some(Value::Null)`.
    pub fn value(&self, sql: &str, params: &[Value]) -> Result<Option<Value>, D1Error> {
        let row = self.first(sql, params)?;
        Ok(row.and_then(|r| r.into_iter().next().map(|(_, v)| v)))
    }

    /// Run a write statement and return `meta.rows_affected`.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, D1Error> {
        Ok(self.query(sql, params)?.affected_rows())
    }
}

/// Unwrap a response envelope into a result set.
///
/// Fields are read one by one, so a mistyped field never hides the others.
/// A status of 400 or above fails even when the body claims success. A
/// body that is not JSON is treated as an envelope without `success`.
pub fn parse_response(response: HttpResponse) -> Result<ResultSet, D1Error> {
    let mut envelope: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);

    let success = envelope
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if response.status >= 400 || !success {
        let message = envelope
            .pointer("/errors/0/message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR)
            .to_string();
        return Err(D1Error::Api {
            status: response.status,
            message,
        });
    }

    let result = envelope
        .get_mut("result")
        .map(Value::take)
        .unwrap_or(Value::Null);
    Ok(ResultSet::new(result))
}
