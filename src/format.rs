use crate::error::D1Error;
use crate::result::{ResultSet, Row};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Rendering used for stdout and file output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Toon,
    Json,
}

impl OutputFormat {
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Toon => "TOON",
            OutputFormat::Json => "JSON",
        }
    }
}

/// Encode any JSON value in the requested format.
pub fn render(value: &Value, format: OutputFormat) -> Result<String, D1Error> {
    match format {
        OutputFormat::Toon => {
            let mut toon = toon_format::encode_default(value)
                .map_err(|e| D1Error::Format { message: e.to_string() })?;
            if !toon.ends_with('\n') {
                toon.push('\n');
            }
            Ok(toon)
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)
                .map_err(|e| D1Error::Format { message: e.to_string() })?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Rows as a JSON array, column order preserved.
pub fn rows_value(rows: &[Row]) -> Value {
    Value::Array(rows.iter().cloned().map(Value::Object).collect())
}

/// Rows plus statistics, as printed by the `query` subcommand.
pub fn query_summary(result: &ResultSet) -> Value {
    let mut map = Map::new();
    map.insert("rows".to_string(), rows_value(result.all()));
    map.insert("count".to_string(), Value::from(result.count()));
    map.insert("rows_affected".to_string(), Value::from(result.affected_rows()));
    map.insert("last_row_id".to_string(), Value::from(result.last_insert_id()));
    Value::Object(map)
}

/// Single-entry object, used for scalar answers (`value`, `execute`).
pub fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
