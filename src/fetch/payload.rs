use serde::Deserialize;

use crate::error::FetchError;
use crate::metrics::PercentileRow;

/// Response body of the percentile endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct PercentileResponse {
    pub(super) success: bool,
    #[serde(default)]
    pub(super) data: Vec<PercentileRow>,
}

/// Envelope discriminator; any object carrying it must be a full envelope.
const ENVELOPE_KEY: &str = "success";

/// Row shapes accepted from percentile files besides the envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Rows(Vec<PercentileRow>),
    Row(PercentileRow),
}

/// Decodes a percentile payload into rows.
///
/// Accepts the backend envelope `{"success": .., "data": [..]}`, a bare array
/// of rows, or a single row object. An object with a `success` key is always
/// read as an envelope.
///
/// # Errors
///
/// Returns `UnexpectedShape` when the JSON matches none of those shapes and
/// `Unsuccessful` when the envelope reports failure.
pub fn decode_rows(value: serde_json::Value, subject: &str) -> Result<Vec<PercentileRow>, FetchError> {
    if value.get(ENVELOPE_KEY).is_some() {
        let response: PercentileResponse = serde_json::from_value(value)
            .map_err(|err| FetchError::UnexpectedShape { source: err })?;
        return rows_from_response(response, subject);
    }

    let payload: Payload =
        serde_json::from_value(value).map_err(|err| FetchError::UnexpectedShape { source: err })?;
    match payload {
        Payload::Rows(rows) => Ok(rows),
        Payload::Row(row) => Ok(vec![row]),
    }
}

pub(super) fn rows_from_response(
    response: PercentileResponse,
    subject: &str,
) -> Result<Vec<PercentileRow>, FetchError> {
    if response.success {
        Ok(response.data)
    } else {
        Err(FetchError::Unsuccessful {
            subject: subject.to_owned(),
        })
    }
}
