use chrono::Duration;
use serde_json::json;

use league_server::utils::jwt;

use crate::common::{
    ADMIN_PASSWORD, ADMIN_USERNAME, DISABLED_PASSWORD, DISABLED_USERNAME, JWT_SECRET, TestApp,
    routes,
};

mod login {
    use super::*;

    #[tokio::test]
    async fn valid_credentials_return_a_bearer_token() {
        let app = TestApp::spawn().await;

        let res = app.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["token_type"], "bearer");
        assert_eq!(res.body["username"], ADMIN_USERNAME);
        assert_eq!(res.body["email"], "admin@example.com");
        assert_eq!(res.body["role"], "admin");
        assert!(!res.str("access_token").is_empty());
        assert!(res.body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn login_records_last_login() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert!(res.body["last_login"].is_string());
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let app = TestApp::spawn().await;

        let unknown = app.login("nobody", "whatever").await;
        let wrong = app.login(ADMIN_USERNAME, "not-the-password").await;

        assert_eq!(unknown.status, 401);
        assert_eq!(wrong.status, 401);
        assert_eq!(unknown.body["code"], "INVALID_CREDENTIALS");
        assert_eq!(unknown.text, wrong.text);
    }

    #[tokio::test]
    async fn inactive_account_is_rejected_with_correct_password() {
        let app = TestApp::spawn().await;

        let res = app.login(DISABLED_USERNAME, DISABLED_PASSWORD).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "ACCOUNT_DISABLED");
        assert!(res.body.get("access_token").is_none());
    }

    #[tokio::test]
    async fn blank_username_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.login("   ", "secret").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"username": "admin"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod bearer_token {
    use super::*;

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::LEAGUES).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::LEAGUES, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_invalid() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .client
            .get(app.url(routes::LEAGUES))
            .header("Authorization", format!("Basic {token}"))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 401);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_invalid() {
        let app = TestApp::spawn().await;
        let forged = jwt::sign("u1", "admin", "admin", "other-secret", Duration::hours(1)).unwrap();

        let res = app.get_with_token(routes::ME, &forged).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let app = TestApp::spawn().await;
        let expired = jwt::sign("u1", "admin", "admin", JWT_SECRET, Duration::hours(-2)).unwrap();

        let res = app.get_with_token(routes::LEAGUES, &expired).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_EXPIRED");
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn returns_profile_without_password_hash() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["username"], ADMIN_USERNAME);
        assert_eq!(res.body["is_active"], true);
        assert!(res.body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn valid_token_for_vanished_user_is_not_found() {
        let app = TestApp::spawn().await;
        let token = jwt::sign("ghost-id", "ghost", "admin", JWT_SECRET, Duration::hours(1)).unwrap();

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
