use serde_json::json;

use crate::common::{MAX_UPLOAD_BYTES, TestApp, routes};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-an-image";

async fn submission(app: &TestApp, token: &str) -> String {
    app.create_submission(token, &json!({"url": "https://example.com/u"}))
        .await
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn stores_object_and_metadata() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;

        let res = app
            .upload_with_token(&routes::upload(&sid), "Goal.PNG", PNG.to_vec(), "image/png", &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let file_name = res.str("file_name");
        assert!(file_name.ends_with(".png"));
        assert_ne!(file_name, "Goal.PNG");
        assert_eq!(res.body["orig_file_name"], "Goal.PNG");
        assert_eq!(res.body["file_size"], PNG.len());
        assert_eq!(res.body["content_type"], "image/png");
        assert_eq!(res.body["submission_id"], sid.as_str());

        let key = res.str("bucket_path");
        assert_eq!(key, format!("Snapshot/{file_name}"));
        assert_eq!(res.str("file_url"), format!("memory://{key}"));
        assert_eq!(app.objects.len().await, 1);
    }

    #[tokio::test]
    async fn files_are_listed_under_their_submission() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;
        app.upload_with_token(&routes::upload(&sid), "a.jpg", PNG.to_vec(), "image/jpeg", &token)
            .await;

        let res = app
            .get_with_token(&routes::submission_files(&sid), &token)
            .await;

        assert_eq!(res.status, 200);
        let files = res.body.as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["orig_file_name"], "a.jpg");
    }

    #[tokio::test]
    async fn files_of_deleted_submission_remain_listed() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;
        app.upload_with_token(&routes::upload(&sid), "a.jpg", PNG.to_vec(), "image/jpeg", &token)
            .await;
        let deleted = app
            .delete_with_token(&routes::url_submission(&sid), &token)
            .await;
        assert_eq!(deleted.status, 200);

        let res = app
            .get_with_token(&routes::submission_files(&sid), &token)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 1);

        let none = app
            .get_with_token(&routes::submission_files("missing"), &token)
            .await;
        assert_eq!(none.status, 200);
        assert!(none.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found_and_nothing_is_stored() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token(&routes::upload("missing"), "a.png", PNG.to_vec(), "image/png", &token)
            .await;

        assert_eq!(res.status, 404);
        assert!(app.objects.is_empty().await);
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;

        let res = app
            .upload_with_token(&routes::upload(&sid), "a.png", Vec::new(), "image/png", &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;
        let big = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];

        let res = app
            .upload_with_token(&routes::upload(&sid), "a.png", big, "image/png", &token)
            .await;

        assert_eq!(res.status, 400);
        assert!(app.objects.is_empty().await);
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;
        let form = reqwest::multipart::Form::new().text("note", "no file here");

        let res = app
            .client
            .post(app.url(&routes::upload(&sid)))
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Missing 'file' field");
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;

        let res = app
            .upload_with_token(&routes::upload(&sid), "a.png", PNG.to_vec(), "image/png", "bogus")
            .await;

        assert_eq!(res.status, 401);
        assert!(app.objects.is_empty().await);
    }
}

mod download_url {
    use super::*;

    #[tokio::test]
    async fn returns_recorded_url() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;
        let uploaded = app
            .upload_with_token(&routes::upload(&sid), "a.png", PNG.to_vec(), "image/png", &token)
            .await;
        let file_name = uploaded.str("file_name");

        let res = app.get_with_token(&routes::upload(&file_name), &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["file_name"], file_name.as_str());
        assert_eq!(res.body["file_url"], uploaded.body["file_url"]);
    }

    #[tokio::test]
    async fn unknown_file_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(&routes::upload("nope.png"), &token).await;

        assert_eq!(res.status, 404);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_object_and_metadata() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let sid = submission(&app, &token).await;
        let uploaded = app
            .upload_with_token(&routes::upload(&sid), "a.png", PNG.to_vec(), "image/png", &token)
            .await;
        let file_name = uploaded.str("file_name");

        let res = app.delete_with_token(&routes::upload(&file_name), &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "File deleted successfully");
        assert!(app.objects.is_empty().await);
        assert_eq!(app.store.file_count().await, 0);

        let again = app.delete_with_token(&routes::upload(&file_name), &token).await;
        assert_eq!(again.status, 404);
    }
}
