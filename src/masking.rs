use crate::config::ConnectionConfig;
use secrecy::{ExposeSecret, SecretString};

/// Format a secret, revealing it only when `show_secrets` is set.
pub fn format_secret(secret: &SecretString, show_secrets: bool) -> String {
    if show_secrets {
        secret.expose_secret().to_string()
    } else {
        "[REDACTED]".to_string()
    }
}

/// One-line description of the D1 target for diagnostics.
pub fn describe_connection(conn: &ConnectionConfig, show_secrets: bool) -> String {
    format!(
        "account={} database={} api_base={} token={}",
        conn.account_id,
        conn.database_id,
        conn.api_base,
        format_secret(&conn.api_token, show_secrets)
    )
}
