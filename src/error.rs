use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failure classes for one outbound Chat Completions call.
#[derive(Error, Debug)]
pub enum OpenAiError {
    /// Transport-level failure before an HTTP status was received
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Upstream rejected the credential (401/403)
    #[error("{0}")]
    Auth(String),

    /// Upstream returned 429
    #[error("{0}")]
    RateLimited(String),

    /// Any other non-success upstream status
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Body did not decode, or the choices array was empty
    #[error("{0}")]
    MalformedResponse(String),
}

impl IntoResponse for OpenAiError {
    fn into_response(self) -> Response {
        // Every class maps to the same uniform response today; a per-variant
        // status code only needs an arm added here.
        let status = match &self {
            OpenAiError::Network(_)
            | OpenAiError::Auth(_)
            | OpenAiError::RateLimited(_)
            | OpenAiError::Api { .. }
            | OpenAiError::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "detail": format!("OpenAI API error: {self}"),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::OpenAiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    async fn response_parts(err: OpenAiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn auth_failure_maps_to_uniform_500() {
        let (status, body) =
            response_parts(OpenAiError::Auth("Incorrect API key provided".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "OpenAI API error: Incorrect API key provided"
        );
    }

    #[tokio::test]
    async fn every_class_keeps_the_detail_prefix() {
        let errors = vec![
            OpenAiError::RateLimited("quota exceeded".into()),
            OpenAiError::Api {
                status: 503,
                message: "overloaded".into(),
            },
            OpenAiError::MalformedResponse("no choices returned".into()),
        ];

        for err in errors {
            let (status, body) = response_parts(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            let detail = body["detail"].as_str().unwrap();
            assert!(detail.starts_with("OpenAI API error: "), "{detail}");
        }
    }
}
