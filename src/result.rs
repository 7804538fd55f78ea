use serde_json::{Map, Value};

/// One result row: column name to scalar value, in the column order the
/// service returned.
pub type Row = Map<String, Value>;

/// Immutable snapshot of a successful query's `result` payload.
#[derive(Debug, Clone)]
pub struct ResultSet {
    raw: Value,
    rows: Vec<Row>,
    meta: Map<String, Value>,
}

impl ResultSet {
    /// Build a result set from the envelope's `result` value.
    ///
    /// The payload is normally an object carrying `results` and `meta`.
    /// The live API wraps that object in a one-element array per
    /// statement; in that case the first statement is read. Missing
    /// `results` or `meta` fall back to empty values. An entry in
    /// `results` that is not an object becomes an empty row, so `count()`
    /// always matches the length of the raw `results` array.
    pub fn new(raw: Value) -> Self {
        let statement = match &raw {
            Value::Array(items) => items.first().and_then(Value::as_object),
            other => other.as_object(),
        };

        let rows = statement
            .and_then(|s| s.get("results"))
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .map(|entry| entry.as_object().cloned().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        let meta = statement
            .and_then(|s| s.get("meta"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self { raw, rows, meta }
    }

    pub fn all(&self) -> &[Row] {
        &self.rows
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `meta.rows_affected`, or 0 when absent.
    pub fn affected_rows(&self) -> u64 {
        self.meta
            .get("rows_affected")
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    /// `meta.last_row_id`, or 0 when absent.
    pub fn last_insert_id(&self) -> i64 {
        self.meta
            .get("last_row_id")
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// The decoded `result` value exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn into_first(self) -> Option<Row> {
        self.rows.into_iter().next()
    }
}
