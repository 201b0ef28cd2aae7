//! API Integration Tests
//!
//! These tests require:
//! - A running PostgreSQL instance reachable through DATABASE_URL, with
//!   permission to create databases (each test server gets its own)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use carport_common::JwtService;
use carport_core::{UserRole, VerifiedIdentity};
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;
use uuid::Uuid;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_with_google() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, email) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, email);
    assert!(Uuid::parse_str(&auth.user.id).is_ok());
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.expires_in, 900);
}

#[tokio::test]
async fn test_login_rejects_unknown_assertion() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new("never-registered"))
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    assert!(!err.success);
    assert_eq!(err.error.code, "INVALID_ASSERTION");
}

#[tokio::test]
async fn test_login_rejects_empty_id_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(""))
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();

    assert_eq!(err.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_populates_profile_from_identity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    server.verifier.register(
        "profile-assertion",
        VerifiedIdentity {
            subject_id: "google-sub-profile".to_string(),
            email: "lena@example.com".to_string(),
            name: Some("Lena Petrova".to_string()),
            avatar_url: Some("https://lh3.googleusercontent.com/a/lena.jpg".to_string()),
        },
    );

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new("profile-assertion"))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, "lena@example.com");
    assert_eq!(auth.user.name, "Lena Petrova");
    assert_eq!(
        auth.user.avatar_url.as_deref(),
        Some("https://lh3.googleusercontent.com/a/lena.jpg")
    );
}

#[tokio::test]
async fn test_first_login_bootstraps_super_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (first_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&first_assertion))
        .await
        .unwrap();
    let first: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let (second_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&second_assertion))
        .await
        .unwrap();
    let second: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(first.user.role, "SUPER_ADMIN");
    assert_eq!(second.user.role, "USER");
}

#[tokio::test]
async fn test_repeat_login_reuses_account() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let first: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let second: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(first.user.id, second.user.id);
    // Each login opens its own session; the first one keeps working
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new(&first.refresh_token),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new(&auth.refresh_token),
        )
        .await
        .unwrap();
    let tokens: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!tokens.access_token.is_empty());
    assert_ne!(tokens.refresh_token, auth.refresh_token);

    // The presented token was consumed by the rotation
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new(&auth.refresh_token),
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(err.error.code, "REFRESH_INVALID");

    // The replacement works
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new(&tokens.refresh_token),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rejects_unknown_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new("never-issued"),
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(err.error.code, "REFRESH_INVALID");
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_revokes_presented_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/logout",
            &LogoutRequest::revoke(&auth.refresh_token),
        )
        .await
        .unwrap();
    let ack: SuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new(&auth.refresh_token),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout_is_idempotent_and_error_free() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Anonymous, naming a token that was never issued
    let response = server
        .post("/api/v1/auth/logout", &LogoutRequest::revoke("bogus"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Anonymous, with no body at all
    let response = server
        .client
        .post(format!("{}/api/v1/auth/logout", server.base_url()))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Revoking the same live token twice
    let (assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    for _ in 0..2 {
        let response = server
            .post(
                "/api/v1/auth/logout",
                &LogoutRequest::revoke(&auth.refresh_token),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
}

#[tokio::test]
async fn test_logout_accepts_expired_access_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Minted with the test secret but already past its lifetime and leeway
    let config = test_config().unwrap();
    let stale = JwtService::new(&config.jwt.secret, -120)
        .issue_access_token(Uuid::new_v4(), "ghost@example.com", UserRole::User)
        .unwrap();

    let response = server
        .post_auth("/api/v1/auth/logout", &stale, &LogoutRequest::default())
        .await
        .unwrap();
    let ack: SuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);
}

#[tokio::test]
async fn test_logout_with_access_token_revokes_all_sessions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    // Two logins, two live sessions for the same account
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let first: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let second: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // No token in the body, so the authenticated caller drops everything
    let response = server
        .post_auth(
            "/api/v1/auth/logout",
            &second.access_token,
            &LogoutRequest::default(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    for token in [&first.refresh_token, &second.refresh_token] {
        let response = server
            .post("/api/v1/auth/refresh", &RefreshTokenRequest::new(token))
            .await
            .unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED)
            .await
            .unwrap();
    }
}

// ============================================================================
// Current User Tests
// ============================================================================

#[tokio::test]
async fn test_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, email) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/api/v1/auth/me", &auth.access_token)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, auth.user.id);
    assert_eq!(user.email, email);
    assert!(user.active);
}

#[tokio::test]
async fn test_current_user_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Every error leaves as the same envelope
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], serde_json::Value::Bool(false));
    assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_current_user_rejects_garbage_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_auth("/api/v1/auth/me", "not-a-valid-jwt")
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(err.error.code, "INVALID_TOKEN");
}

// ============================================================================
// User Administration Tests
// ============================================================================

#[tokio::test]
async fn test_list_users_requires_admin_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (admin_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&admin_assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let (member_assertion, member_email) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&member_assertion))
        .await
        .unwrap();
    let member: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Plain members are refused
    let response = server
        .get_auth("/api/v1/users", &member.access_token)
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error.code, "FORBIDDEN");

    // The bootstrap admin sees both accounts
    let response = server
        .get_auth("/api/v1/users", &admin.access_token)
        .await
        .unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(users.len(), 2);
    assert!(users.iter().any(|u| u.email == member_email));
}

#[tokio::test]
async fn test_update_user_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (admin_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&admin_assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let (member_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&member_assertion))
        .await
        .unwrap();
    let member: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Members cannot hand out roles, not even their own
    let response = server
        .patch_auth(
            &format!("/api/v1/users/{}/role", member.user.id),
            &member.access_token,
            &UpdateRoleRequest::to("ADMIN"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/users/{}/role", member.user.id),
            &admin.access_token,
            &UpdateRoleRequest::to("SALES"),
        )
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.role, "SALES");
}

#[tokio::test]
async fn test_update_role_rejects_bad_input() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (admin_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&admin_assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Unknown user id
    let response = server
        .patch_auth(
            &format!("/api/v1/users/{}/role", Uuid::new_v4()),
            &admin.access_token,
            &UpdateRoleRequest::to("ADMIN"),
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.code, "UNKNOWN_USER");

    // Malformed user id
    let response = server
        .patch_auth(
            "/api/v1/users/not-a-uuid/role",
            &admin.access_token,
            &UpdateRoleRequest::to("ADMIN"),
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(err.error.code, "INVALID_PATH_PARAMETER");

    // Role outside the catalog
    let response = server
        .patch_auth(
            &format!("/api/v1/users/{}/role", admin.user.id),
            &admin.access_token,
            &UpdateRoleRequest::to("JANITOR"),
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(err.error.code, "INVALID_REQUEST_BODY");
}

#[tokio::test]
async fn test_deactivated_user_is_locked_out() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (admin_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&admin_assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let (member_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&member_assertion))
        .await
        .unwrap();
    let member: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/users/{}/active", member.user.id),
            &admin.access_token,
            &SetActiveRequest { active: false },
        )
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!updated.active);

    // The access token still validates cryptographically, but the account
    // gate refuses it
    let response = server
        .get_auth("/api/v1/auth/me", &member.access_token)
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(err.error.code, "ACCOUNT_DISABLED");

    // Refresh and fresh logins are refused too
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new(&member.refresh_token),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&member_assertion))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

// ============================================================================
// Invoice Tests
// ============================================================================

#[tokio::test]
async fn test_create_invoice_allocates_number() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Lowercase input normalizes into the partition code
    let request = CreateInvoiceRequest::unique("ru");
    let response = server
        .post_auth("/api/v1/invoices", &admin.access_token, &request)
        .await
        .unwrap();
    let invoice: InvoiceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(invoice.number.starts_with("RU-"));
    assert!(invoice.number.ends_with("001"));
    assert_eq!(invoice.number.len(), "RU-YYYYMMDD001".len());
    assert_eq!(invoice.country_code, "RU");
    assert_eq!(invoice.customer_name, request.customer_name);
    assert_eq!(invoice.amount_cents, 1_250_000);
    assert_eq!(invoice.created_by, admin.user.id);

    // Same partition continues the day's sequence
    let response = server
        .post_auth(
            "/api/v1/invoices",
            &admin.access_token,
            &CreateInvoiceRequest::unique("RU"),
        )
        .await
        .unwrap();
    let invoice: InvoiceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(invoice.number.ends_with("002"));

    // A different partition starts its own
    let response = server
        .post_auth(
            "/api/v1/invoices",
            &admin.access_token,
            &CreateInvoiceRequest::unique("KZ"),
        )
        .await
        .unwrap();
    let invoice: InvoiceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(invoice.number.starts_with("KZ-"));
    assert!(invoice.number.ends_with("001"));
}

#[tokio::test]
async fn test_role_change_takes_effect_after_refresh() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (admin_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&admin_assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let (member_assertion, _) = server.verifier.register_unique();
    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&member_assertion))
        .await
        .unwrap();
    let member: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Plain members cannot create invoices
    let response = server
        .post_auth(
            "/api/v1/invoices",
            &member.access_token,
            &CreateInvoiceRequest::unique("RU"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/users/{}/role", member.user.id),
            &admin.access_token,
            &UpdateRoleRequest::to("SALES"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The old access token still carries the old role claim
    let response = server
        .post_auth(
            "/api/v1/invoices",
            &member.access_token,
            &CreateInvoiceRequest::unique("RU"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Rotating mints a token with the new role, which opens the gate
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest::new(&member.refresh_token),
        )
        .await
        .unwrap();
    let tokens: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/invoices",
            &tokens.access_token,
            &CreateInvoiceRequest::unique("RU"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_invoice_endpoints_require_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/invoices", &CreateInvoiceRequest::unique("RU"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let response = server.get("/api/v1/invoices").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_invoice() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/invoices",
            &admin.access_token,
            &CreateInvoiceRequest::unique("RU"),
        )
        .await
        .unwrap();
    let created: InvoiceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/invoices/{}", created.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    let fetched: InvoiceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.number, created.number);

    let response = server
        .get_auth(
            &format!("/api/v1/invoices/{}", Uuid::new_v4()),
            &admin.access_token,
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.code, "UNKNOWN_INVOICE");

    let response = server
        .get_auth("/api/v1/invoices/not-a-uuid", &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_invoices_newest_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    for _ in 0..3 {
        let response = server
            .post_auth(
                "/api/v1/invoices",
                &admin.access_token,
                &CreateInvoiceRequest::unique("RU"),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth("/api/v1/invoices", &admin.access_token)
        .await
        .unwrap();
    let invoices: Vec<InvoiceResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(invoices.len(), 3);
    assert!(invoices[0].number.ends_with("003"));
    assert!(invoices[2].number.ends_with("001"));

    let response = server
        .get_auth("/api/v1/invoices?limit=2", &admin.access_token)
        .await
        .unwrap();
    let invoices: Vec<InvoiceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(invoices.len(), 2);
}

#[tokio::test]
async fn test_create_invoice_validates_body() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (assertion, _) = server.verifier.register_unique();

    let response = server
        .post("/api/v1/auth/google", &LoginRequest::new(&assertion))
        .await
        .unwrap();
    let admin: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Field-level failures
    let response = server
        .post_auth(
            "/api/v1/invoices",
            &admin.access_token,
            &CreateInvoiceRequest {
                country_code: "RU".to_string(),
                customer_name: String::new(),
                amount_cents: -1,
            },
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(err.error.code, "VALIDATION_ERROR");

    // Partition codes are 2-3 letters
    let response = server
        .post_auth(
            "/api/v1/invoices",
            &admin.access_token,
            &CreateInvoiceRequest::unique("RUSS"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();

    // Malformed JSON never reaches the handler
    let response = server
        .client
        .post(format!("{}/api/v1/invoices", server.base_url()))
        .header("Authorization", format!("Bearer {}", admin.access_token))
        .header("Content-Type", "application/json")
        .body("{\"countryCode\"")
        .send()
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(err.error.code, "INVALID_REQUEST_BODY");
}
