use crate::error::D1Error;
use crate::format::{self, OutputFormat};
use std::path::Path;

/// Print rendered output to stdout.
pub fn print_result(rendered: &str) {
    print!("{}", rendered);
}

/// Print error to stderr in the contract format: error: <category>: <message>
pub fn print_error(err: &D1Error) {
    eprintln!("error: {}", err);
}

/// Summary printed after writing results to a file.
pub fn summary_value(rows: usize, path: &Path) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert("rows_written".to_string(), serde_json::Value::from(rows));
    map.insert(
        "file".to_string(),
        serde_json::Value::String(path.display().to_string()),
    );
    serde_json::Value::Object(map)
}

/// Print the file output summary to stdout.
pub fn print_summary(rows: usize, path: &Path, format: OutputFormat) -> Result<(), D1Error> {
    let rendered = format::render(&summary_value(rows, path), format)?;
    print!("{}", rendered);
    Ok(())
}

/// Write rendered output to a file; the parent directory must exist.
pub fn write_file(rendered: &str, path: &Path) -> Result<(), D1Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(D1Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("parent directory does not exist: {}", parent.display()),
        )));
    }
    std::fs::write(path, rendered)?;
    Ok(())
}
