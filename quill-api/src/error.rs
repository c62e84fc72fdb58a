use anyhow::{anyhow, Context};
use http::StatusCode;
use serde_json::json;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Permission denied")]
    Forbidden,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Error::Network(msg)
            | Error::NotFound(msg)
            | Error::BadRequest(msg)
            | Error::Conflict(msg)
            | Error::Unknown(msg) => msg,
            Error::Unauthorized => "unauthorized",
            Error::Forbidden => "permission denied",
        }
    }

    /// Response body, in the `{ "error": message }` shape the server uses
    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&json!({ "error": self.message() })).expect("serializing error")
    }

    /// Rebuild an error from a non-success HTTP response
    pub fn from_response(status: StatusCode, body: &[u8]) -> Error {
        let msg = match Error::parse_message(body) {
            Ok(msg) => msg,
            Err(err) => {
                tracing::debug!(?err, "error body is not in the usual format");
                String::from_utf8_lossy(body).into_owned()
            }
        };
        match status {
            StatusCode::NOT_FOUND => Error::NotFound(msg),
            StatusCode::BAD_REQUEST => Error::BadRequest(msg),
            StatusCode::CONFLICT => Error::Conflict(msg),
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::FORBIDDEN => Error::Forbidden,
            _ => Error::Unknown(format!("{status}: {msg}")),
        }
    }

    fn parse_message(body: &[u8]) -> anyhow::Result<String> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        Ok(String::from(
            data.get("error")
                .and_then(|msg| msg.as_str())
                .ok_or_else(|| anyhow!("error message is not a string"))?,
        ))
    }
}
