use std::fmt;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use coursebook_core::{AppError, hash_password_async, verify_password_async};
use coursebook_db::UserRepository;
use coursebook_models::User;
use tokio::sync::OnceCell;
use tracing::{error, warn};

use crate::state::AppState;

/// Verified against on a lookup miss so that an unknown identifier costs one
/// bcrypt verification, the same as a wrong secret.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_hash() -> Result<&'static str, AppError> {
    DUMMY_HASH
        .get_or_try_init(|| hash_password_async("coursebook-unknown-identifier".to_string()))
        .await
        .map(String::as_str)
}

/// Computes the dummy hash ahead of the first request.
pub async fn prime_dummy_hash() -> Result<(), AppError> {
    dummy_hash().await.map(|_| ())
}

/// Identifier and plaintext secret taken from one request.
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Decodes an `Authorization: Basic` header.
///
/// Returns `None` when the header is missing, is not valid base64, has no
/// `:` separator, or uses another scheme.
pub fn extract_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let Authorization(basic) = headers.typed_get::<Authorization<Basic>>()?;

    Some(Credentials {
        identifier: basic.username().to_string(),
        secret: basic.password().to_string(),
    })
}

/// Why a request was turned away. The text is for operator logs only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("Auth header not found")]
    MissingCredentials,
    #[error("User not found for identifier: {0}")]
    UnknownIdentifier(String),
    #[error("Authentication failure for identifier: {0}")]
    SecretMismatch(String),
}

#[derive(Debug)]
pub enum GateDecision {
    Admitted(User),
    Denied(Denial),
}

/// Decides whether a request carrying `credentials` is admitted.
///
/// Only a failing user lookup produces `Err`; every denial is `Ok(Denied)`.
/// bcrypt runs on the blocking pool.
pub async fn authenticate(
    users: &dyn UserRepository,
    credentials: Option<Credentials>,
) -> Result<GateDecision, AppError> {
    let Some(Credentials { identifier, secret }) = credentials else {
        return Ok(GateDecision::Denied(Denial::MissingCredentials));
    };

    let Some(user) = users.find_by_email(&identifier).await? else {
        match dummy_hash().await {
            Ok(hash) => {
                let _ = verify_password_async(secret, hash.to_string()).await;
            }
            Err(err) => error!(error = ?err, "Dummy password hash unavailable"),
        }
        return Ok(GateDecision::Denied(Denial::UnknownIdentifier(identifier)));
    };

    let verified = verify_password_async(secret, user.password.clone())
        .await
        .unwrap_or_else(|err| {
            warn!(user_id = user.id, error = ?err, "Password verification failed");
            false
        });

    if verified {
        Ok(GateDecision::Admitted(user))
    } else {
        Ok(GateDecision::Denied(Denial::SecretMismatch(identifier)))
    }
}

/// Extractor that runs the authentication gate and yields the principal.
///
/// Place it before any body extractor so the gate runs first.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = extract_credentials(&parts.headers);

        match authenticate(state.users.as_ref(), credentials).await? {
            GateDecision::Admitted(user) => Ok(CurrentUser(user)),
            GateDecision::Denied(denial) => {
                warn!(reason = %denial, path = %parts.uri.path(), "Authentication denied");
                Err(AppError::unauthorized(denial.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};
    use coursebook_core::hash_password;
    use coursebook_db::memory::InMemoryStore;
    use coursebook_models::NewUser;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    async fn store_with_user(email: &str, password: &str) -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .create(NewUser {
                first_name: "Joe".to_string(),
                last_name: "Smith".to_string(),
                email_address: email.to_string(),
                password_hash: hash_password(password).unwrap(),
            })
            .await
            .unwrap();
        store
    }

    #[test]
    fn test_extract_basic_credentials() {
        // joe@smith.com:joepassword
        let headers = headers_with("Basic am9lQHNtaXRoLmNvbTpqb2VwYXNzd29yZA==");
        let credentials = extract_credentials(&headers).unwrap();

        assert_eq!(credentials.identifier, "joe@smith.com");
        assert_eq!(credentials.secret, "joepassword");
    }

    #[test]
    fn test_extract_rejects_missing_and_foreign_schemes() {
        assert!(extract_credentials(&HeaderMap::new()).is_none());
        assert!(extract_credentials(&headers_with("Bearer abc.def.ghi")).is_none());
        assert!(extract_credentials(&headers_with("Basic !!!not-base64")).is_none());
        // "nocolon" has no separator
        assert!(extract_credentials(&headers_with("Basic bm9jb2xvbg==")).is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials {
            identifier: "joe@smith.com".to_string(),
            secret: "joepassword".to_string(),
        };
        assert!(!format!("{:?}", credentials).contains("joepassword"));
    }

    #[tokio::test]
    async fn test_missing_credentials_denied() {
        let store = InMemoryStore::new();
        let decision = authenticate(&store, None).await.unwrap();

        match decision {
            GateDecision::Denied(denial) => {
                assert_eq!(denial.to_string(), "Auth header not found");
            }
            GateDecision::Admitted(_) => panic!("expected denial"),
        }
    }

    #[tokio::test]
    async fn test_unknown_identifier_denied() {
        let store = store_with_user("joe@smith.com", "joepassword").await;
        let credentials = Credentials {
            identifier: "sally@jones.com".to_string(),
            secret: "joepassword".to_string(),
        };

        let decision = authenticate(&store, Some(credentials)).await.unwrap();
        assert!(matches!(
            decision,
            GateDecision::Denied(Denial::UnknownIdentifier(ref id)) if id == "sally@jones.com"
        ));
    }

    #[tokio::test]
    async fn test_wrong_secret_denied_and_right_secret_admitted() {
        let store = store_with_user("joe@smith.com", "joepassword").await;

        let wrong = Credentials {
            identifier: "joe@smith.com".to_string(),
            secret: "joepassword!".to_string(),
        };
        let decision = authenticate(&store, Some(wrong)).await.unwrap();
        assert_eq!(
            match decision {
                GateDecision::Denied(denial) => denial.to_string(),
                GateDecision::Admitted(_) => String::new(),
            },
            "Authentication failure for identifier: joe@smith.com"
        );

        let right = Credentials {
            identifier: "joe@smith.com".to_string(),
            secret: "joepassword".to_string(),
        };
        let decision = authenticate(&store, Some(right)).await.unwrap();
        assert!(matches!(decision, GateDecision::Admitted(ref user) if user.first_name == "Joe"));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_an_error_not_a_denial() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);
        let credentials = Credentials {
            identifier: "joe@smith.com".to_string(),
            secret: "joepassword".to_string(),
        };

        assert!(authenticate(&store, Some(credentials)).await.is_err());
    }

    #[tokio::test]
    async fn test_secret_differing_after_byte_72_denied() {
        let store = store_with_user("joe@smith.com", &"a".repeat(72)).await;
        let tampered = Credentials {
            identifier: "joe@smith.com".to_string(),
            secret: format!("{}totally-different", "a".repeat(72)),
        };

        let decision = authenticate(&store, Some(tampered)).await.unwrap();
        assert!(matches!(
            decision,
            GateDecision::Denied(Denial::SecretMismatch(_))
        ));
    }

    #[tokio::test]
    async fn test_prime_dummy_hash_is_idempotent() {
        prime_dummy_hash().await.unwrap();
        let first = dummy_hash().await.unwrap();
        prime_dummy_hash().await.unwrap();
        assert_eq!(first, dummy_hash().await.unwrap());
        assert!(first.starts_with("$2"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_gate_does_not_block_other_tasks() {
        let store = std::sync::Arc::new(store_with_user("joe@smith.com", "joepassword").await);

        let gate_store = store.clone();
        let started = tokio::time::Instant::now();
        let gate = tokio::spawn(async move {
            let credentials = Credentials {
                identifier: "joe@smith.com".to_string(),
                secret: "joepassword".to_string(),
            };
            authenticate(gate_store.as_ref(), Some(credentials)).await
        });

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let timer_latency = started.elapsed();

        let decision = gate.await.unwrap().unwrap();
        assert!(matches!(decision, GateDecision::Admitted(_)));
        assert!(
            timer_latency < std::time::Duration::from_millis(150),
            "timer fired after {:?}",
            timer_latency
        );
    }
}
