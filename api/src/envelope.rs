//! The `{success, data?, error?}` wrapper every node endpoint responds with.

use dioxus_logger::tracing;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::ApiError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Splits the envelope on its `success` flag.
    ///
    /// A successful response may legitimately carry no data (e.g. an opaque
    /// acknowledgement), so the payload stays optional here.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                message: self.error,
            })
        }
    }

    /// Like [`ApiResponse::into_result`] but the payload is required.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?.ok_or(ApiError::MissingData)
    }
}

/// Decodes a raw HTTP exchange into an envelope.
///
/// Any status outside 2xx is a transport failure, whatever the body says.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<ApiResponse<T>, ApiError> {
    if !(200..300).contains(&status) {
        tracing::debug!(
            "node answered {}: {}",
            status,
            String::from_utf8_lossy(body)
        );
        return Err(ApiError::Status(status));
    }
    Ok(serde_json::from_slice(body)?)
}
