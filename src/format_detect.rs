use std::path::{Path, PathBuf};

use crate::error::D1Error;
use crate::format::OutputFormat;

/// Detect the output format from a file path extension.
/// Returns the format and the (possibly normalized) path.
///
/// - `.toon`, `.txt` → Toon
/// - `.json` → Json
/// - No extension → appends `.toon`, returns Toon
/// - Unrecognized → error with supported format list
pub fn detect_format(path: &Path) -> Result<(OutputFormat, PathBuf), D1Error> {
    let ext = match path.extension() {
        Some(e) => e.to_ascii_lowercase(),
        None => {
            let mut p = path.to_path_buf();
            p.set_extension("toon");
            return Ok((OutputFormat::Toon, p));
        }
    };

    let format = match ext.to_str().unwrap_or("") {
        "toon" | "txt" => OutputFormat::Toon,
        "json" => OutputFormat::Json,
        other => {
            return Err(D1Error::Format {
                message: format!(
                    "unsupported output format \".{other}\" — supported: .toon, .txt, .json"
                ),
            });
        }
    };

    Ok((format, path.to_path_buf()))
}
