use axum::{
    Json,
    body::Body,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use coursebook_core::{
    AppError, RuleSet, ValidationIssue,
    validation::evaluate,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const BODY_LIMIT: usize = 2 * 1024 * 1024;

fn body_issue(message: impl Into<String>) -> AppError {
    AppError::validation(vec![ValidationIssue::new("body", message)])
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            body_issue("Missing 'Content-Type: application/json' header")
        }
        JsonRejection::JsonSyntaxError(_) => body_issue("Request body is not valid JSON"),
        _ => body_issue("Invalid request body"),
    }
}

/// JSON body extractor that runs `T::RULES` against the raw payload before
/// deserialising it.
///
/// An empty body is treated as `{}` so that every rule still reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RuleSet,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = axum::body::to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|_| body_issue("Request body is too large"))?;

        let payload = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            let req = Request::from_parts(parts, Body::from(bytes));
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(rejection_to_error)?;
            value
        };

        let issues = evaluate(&payload, T::RULES);
        if !issues.is_empty() {
            return Err(AppError::validation(issues));
        }

        serde_json::from_value(payload)
            .map(ValidatedJson)
            .map_err(|err| body_issue(format!("Invalid request body: {}", err)))
    }
}
