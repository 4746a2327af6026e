use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Stats backend returned HTTP {status} for '{url}'.")]
    Status { url: String, status: u16 },
    #[error("Stats backend reported failure for '{subject}'.")]
    Unsuccessful { subject: String },
    #[error("Failed to read percentile file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Percentile file '{path}' is not valid JSON: {source}")]
    ParseFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "Percentile payload must be an object, an array of objects, or a {{success, data}} envelope: {source}"
    )]
    UnexpectedShape {
        #[source]
        source: serde_json::Error,
    },
}
