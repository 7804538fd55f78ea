use crate::error::D1Error;
use serde_json::Value;

/// Parse one `--param` value.
///
/// JSON scalars (`42`, `1.5`, `true`, `null`, `"quoted"`) keep their type.
/// Anything that is not valid JSON is bound as a plain string. Arrays and
/// objects are rejected since D1 only binds scalars.
pub fn parse_param(raw: &str) -> Result<Value, D1Error> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(_)) | Ok(Value::Object(_)) => Err(D1Error::Input {
            message: format!("parameter must be a scalar, got {}", raw),
        }),
        Ok(value) => Ok(value),
        Err(_) => Ok(Value::String(raw.to_string())),
    }
}

pub fn parse_params(raw: &[String]) -> Result<Vec<Value>, D1Error> {
    raw.iter().map(|p| parse_param(p)).collect()
}
