use chrono::{DateTime, Utc};
use serde_json::json;

use crate::common::{TestApp, routes};

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("timestamp should be a string")
        .parse()
        .expect("timestamp should be RFC 3339")
}

mod create {
    use super::*;

    #[tokio::test]
    async fn new_league_gets_uuid_and_equal_timestamps() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::LEAGUES,
                &json!({
                    "league_name": "Premier League",
                    "country": "UK",
                    "season": "2024/25",
                    "status": "active",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.str("league_id").len(), 36);
        assert_eq!(res.body["league_name"], "Premier League");
        assert_eq!(res.body["created_at"], res.body["updated_at"]);
    }

    #[tokio::test]
    async fn blank_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::LEAGUES,
                &json!({
                    "league_name": "  ",
                    "country": "UK",
                    "season": "2024/25",
                    "status": "active",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn get_returns_what_was_created() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_league(&token, "La Liga").await;

        let res = app.get_with_token(&routes::league(&id), &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["league_id"], id.as_str());
        assert_eq!(res.body["league_name"], "La Liga");
        assert_eq!(res.body["country"], "UK");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let first = app.create_league(&token, "First").await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = app.create_league(&token, "Second").await;

        let res = app.get_with_token(routes::LEAGUES, &token).await;

        assert_eq!(res.status, 200);
        let ids: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["league_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(&routes::league("missing"), &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn status_patch_bumps_updated_at_and_keeps_other_fields() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_league(&token, "Serie A").await;
        let before = app.get_with_token(&routes::league(&id), &token).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let res = app
            .put_with_token(&routes::league(&id), &json!({"status": "completed"}), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "completed");
        assert_eq!(res.body["league_name"], before.body["league_name"]);
        assert_eq!(res.body["country"], before.body["country"]);
        assert_eq!(res.body["season"], before.body["season"]);
        assert_eq!(res.body["created_at"], before.body["created_at"]);
        assert!(timestamp(&res.body["updated_at"]) > timestamp(&res.body["created_at"]));
    }

    #[tokio::test]
    async fn missing_league_is_not_found_and_nothing_is_written() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .put_with_token(&routes::league("missing"), &json!({"status": "x"}), &token)
            .await;

        assert_eq!(res.status, 404);
        let list = app.get_with_token(routes::LEAGUES, &token).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleted_league_is_gone() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_league(&token, "Bundesliga").await;

        let res = app.delete_with_token(&routes::league(&id), &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["league_id"], id.as_str());
        assert_eq!(
            res.body["message"],
            format!("League 'Bundesliga' (ID: {id}) deleted successfully")
        );

        let again = app.get_with_token(&routes::league(&id), &token).await;
        assert_eq!(again.status, 404);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_league(&token, "Ligue 1").await;

        app.delete_with_token(&routes::league(&id), &token).await;
        let res = app.delete_with_token(&routes::league(&id), &token).await;

        assert_eq!(res.status, 404);
    }
}
