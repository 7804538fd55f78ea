use thiserror::Error;

#[derive(Debug, Error)]
pub enum D1Error {
    /// The HTTP call itself could not complete (DNS, refused, timeout).
    #[error("transport: {message}")]
    Transport { message: String },

    /// The service answered but reported failure.
    #[error("api: D1 API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("config: {message}")]
    Config { message: String },

    #[error("input: {message}")]
    Input { message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("format: {message}")]
    Format { message: String },
}

impl D1Error {
    /// HTTP status carried by an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            D1Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
