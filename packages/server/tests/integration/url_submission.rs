use serde_json::json;

use crate::common::{TestApp, routes};

/// League "Premier League" with match 1001 (Arsenal VS Chelsea, 2025-03-01).
async fn fixture(app: &TestApp, token: &str) -> String {
    let league_id = app.create_league(token, "Premier League").await;
    app.create_match(token, 1001, &league_id).await;
    league_id
}

mod create {
    use super::*;

    #[tokio::test]
    async fn view_carries_league_and_match_labels() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let league_id = fixture(&app, &token).await;

        let res = app
            .post_with_token(
                routes::URL_SUBMISSIONS,
                &json!({
                    "url": "https://example.com/highlights",
                    "type": "video",
                    "league_id": league_id,
                    "match_id": 1001,
                    "status": "pending",
                    "image_file_name": "thumb.PNG",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["type"], "video");
        assert_eq!(res.body["league_name"], "Premier League");
        assert_eq!(res.body["matches_name"], "Arsenal VS Chelsea (2025-03-01)");
        assert_eq!(res.str("submission_id").len(), 36);
    }

    #[tokio::test]
    async fn bare_url_is_enough() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let id = app
            .create_submission(&token, &json!({"url": "https://example.com/a"}))
            .await;

        let res = app.get_with_token(&routes::url_submission(&id), &token).await;
        assert_eq!(res.status, 200);
        assert!(res.body["league_name"].is_null());
        assert!(res.body["matches_name"].is_null());
    }

    #[tokio::test]
    async fn same_url_for_same_match_conflicts() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        fixture(&app, &token).await;
        let body = json!({"url": "https://example.com/dup", "match_id": 1001});
        app.create_submission(&token, &body).await;

        let res = app.post_with_token(routes::URL_SUBMISSIONS, &body, &token).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "ALREADY_EXISTS");
        assert_eq!(res.body["message"], "URL already exists for this match");
    }

    #[tokio::test]
    async fn same_url_without_match_is_allowed_twice() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let body = json!({"url": "https://example.com/free"});

        app.create_submission(&token, &body).await;
        app.create_submission(&token, &body).await;

        let list = app.get_with_token(routes::URL_SUBMISSIONS, &token).await;
        assert_eq!(list.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_match_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::URL_SUBMISSIONS,
                &json!({"url": "https://example.com/x", "match_id": 999}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn non_image_file_name_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::URL_SUBMISSIONS,
                &json!({"url": "https://example.com/x", "image_file_name": "shot.gif"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["message"],
            "Invalid file type. Only .png, .jpg, and .jpeg files are allowed."
        );
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn patch_changes_only_given_fields() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_submission(
                &token,
                &json!({"url": "https://example.com/p", "type": "video", "status": "pending"}),
            )
            .await;

        let res = app
            .put_with_token(
                &routes::url_submission(&id),
                &json!({"status": "approved"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "approved");
        assert_eq!(res.body["type"], "video");
        assert_eq!(res.body["url"], "https://example.com/p");
    }

    #[tokio::test]
    async fn moving_onto_a_taken_pair_conflicts() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        fixture(&app, &token).await;
        app.create_submission(&token, &json!({"url": "https://example.com/a", "match_id": 1001}))
            .await;
        let other = app
            .create_submission(&token, &json!({"url": "https://example.com/b", "match_id": 1001}))
            .await;

        let res = app
            .put_with_token(
                &routes::url_submission(&other),
                &json!({"url": "https://example.com/a"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 409);
        let stored = app.get_with_token(&routes::url_submission(&other), &token).await;
        assert_eq!(stored.body["url"], "https://example.com/b");
    }

    #[tokio::test]
    async fn resubmitting_own_pair_is_not_a_conflict() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        fixture(&app, &token).await;
        let id = app
            .create_submission(&token, &json!({"url": "https://example.com/a", "match_id": 1001}))
            .await;

        let res = app
            .put_with_token(
                &routes::url_submission(&id),
                &json!({"url": "https://example.com/a", "status": "approved"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn missing_submission_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .put_with_token(
                &routes::url_submission("missing"),
                &json!({"status": "approved"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleted_submission_is_gone() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_submission(&token, &json!({"url": "https://example.com/d"}))
            .await;

        let res = app.delete_with_token(&routes::url_submission(&id), &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body["message"],
            format!("URL submission '{id}' deleted successfully")
        );
        let again = app.get_with_token(&routes::url_submission(&id), &token).await;
        assert_eq!(again.status, 404);
    }
}
