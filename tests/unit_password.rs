use coursebook::coursebook_core::{
    AppError, MAX_PASSWORD_BYTES, hash_password, hash_password_async, verify_password,
    verify_password_async,
};
use coursebook::coursebook_db::UserRepository;
use coursebook::coursebook_db::memory::InMemoryStore;
use coursebook::coursebook_models::NewUser;
use coursebook::middleware::auth::{Credentials, Denial, GateDecision, authenticate};

async fn store_with_hash(email: &str, password_hash: String) -> InMemoryStore {
    let store = InMemoryStore::new();
    UserRepository::create(
        &store,
        NewUser {
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: email.to_string(),
            password_hash,
        },
    )
    .await
    .unwrap();
    store
}

fn credentials(identifier: &str, secret: &str) -> Option<Credentials> {
    Some(Credentials {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    })
}

#[tokio::test]
async fn test_async_round_trip() {
    let longest = "k".repeat(MAX_PASSWORD_BYTES);
    for password in ["joepassword", "", "пароль密码🔒", longest.as_str()] {
        let hash = hash_password_async(password.to_string()).await.unwrap();

        assert_ne!(hash, password);
        assert!(
            verify_password_async(password.to_string(), hash)
                .await
                .unwrap()
        );
    }
}

#[test]
fn test_tampered_secrets_do_not_verify() {
    let stored = "a".repeat(MAX_PASSWORD_BYTES);
    let hash = hash_password(&stored).unwrap();

    let tampered = [
        "A".repeat(MAX_PASSWORD_BYTES),
        "a".repeat(MAX_PASSWORD_BYTES - 1),
        format!("{stored} "),
        "a".repeat(100),
    ];
    for secret in &tampered {
        assert!(!verify_password(secret, &hash).unwrap(), "{secret:?} verified");
    }
}

#[test]
fn test_hundred_byte_password_is_refused_at_hashing() {
    let err = hash_password(&"a".repeat(100)).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_gate_denies_overlong_secret_sharing_stored_prefix() {
    let stored = "b".repeat(MAX_PASSWORD_BYTES);
    let store = store_with_hash("joe@smith.com", hash_password(&stored).unwrap()).await;

    let decision = authenticate(
        &store,
        credentials("joe@smith.com", &format!("{stored}-and-then-some")),
    )
    .await
    .unwrap();
    assert!(matches!(
        decision,
        GateDecision::Denied(Denial::SecretMismatch(_))
    ));

    let decision = authenticate(&store, credentials("joe@smith.com", &stored))
        .await
        .unwrap();
    assert!(matches!(decision, GateDecision::Admitted(_)));
}

#[tokio::test]
async fn test_malformed_stored_hash_is_a_mismatch_at_the_gate() {
    let malformed = "not_a_valid_bcrypt_hash".to_string();
    assert!(verify_password("joepassword", &malformed).is_err());

    let store = store_with_hash("joe@smith.com", malformed).await;
    let decision = authenticate(&store, credentials("joe@smith.com", "joepassword"))
        .await
        .unwrap();

    assert!(matches!(
        decision,
        GateDecision::Denied(Denial::SecretMismatch(ref id)) if id == "joe@smith.com"
    ));
}
