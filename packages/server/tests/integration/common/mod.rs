use std::net::SocketAddr;
use std::sync::Arc;

use ::common::storage::ObjectStore;
use ::common::storage::memory::MemoryObjectStore;
use ::common::{StorageBackend, StorageConfig};
use reqwest::Client;
use serde_json::{Value, json};

use league_server::config::{AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig};
use league_server::repository::{MemoryStore, NewUser, Repositories, UserRepository};
use league_server::state::AppState;
use league_server::utils::hash;

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const DISABLED_USERNAME: &str = "retired";
pub const DISABLED_PASSWORD: &str = "retired-password";
/// Upload limit used by every test server.
pub const MAX_UPLOAD_BYTES: u64 = 1024;

pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const ME: &str = "/me";
    pub const HEALTH: &str = "/health";
    pub const LEAGUES: &str = "/leagues";
    pub const MATCHES: &str = "/matches";
    pub const URL_SUBMISSIONS: &str = "/url_submission";

    pub fn league(id: &str) -> String {
        format!("/leagues/{id}")
    }

    pub fn match_(id: i64) -> String {
        format!("/matches/{id}")
    }

    pub fn url_submission(id: &str) -> String {
        format!("/url_submission/{id}")
    }

    pub fn submission_files(id: &str) -> String {
        format!("/url_submission/{id}/files")
    }

    pub fn upload(id: &str) -> String {
        format!("/upload/{id}")
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
            cors: CorsConfig {
                allow_origins: vec!["*".to_string()],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "memory://".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            token_ttl_hours: 1,
            bootstrap_admin: None,
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            ..Default::default()
        },
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Backing repositories, for assertions the API cannot express.
    pub store: MemoryStore,
    pub objects: Arc<MemoryObjectStore>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// The body's string field `key`.
    pub fn str(&self, key: &str) -> String {
        self.body[key]
            .as_str()
            .unwrap_or_else(|| panic!("Response has no string field '{key}': {}", self.text))
            .to_string()
    }
}

async fn seed_user(store: &MemoryStore, username: &str, password: &str, is_active: bool) {
    store
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash::hash_password(password).expect("Failed to hash password"),
            role: "admin".to_string(),
            is_active,
        })
        .await
        .expect("Failed to seed user");
}

/// Bind `state`'s router to an ephemeral port.
pub async fn serve(state: AppState) -> SocketAddr {
    let app = league_server::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = MemoryStore::new();
        seed_user(&store, ADMIN_USERNAME, ADMIN_PASSWORD, true).await;
        seed_user(&store, DISABLED_USERNAME, DISABLED_PASSWORD, false).await;

        let objects = Arc::new(MemoryObjectStore::new());
        let object_store: Arc<dyn ObjectStore> = objects.clone();

        let state = AppState::new(
            test_config(),
            Some(Repositories::from_memory(store.clone())),
            Some(object_store),
        );

        Self {
            addr: serve(state).await,
            client: Client::new(),
            store,
            objects,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_with_token(
        &self,
        path: &str,
        file_name: &str,
        file_bytes: Vec<u8>,
        mime: &str,
        token: &str,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("Failed to set MIME type");
        let form = reqwest::multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    /// Log in as `username`, returning the raw response.
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_without_token(
            routes::LOGIN,
            &json!({"username": username, "password": password}),
        )
        .await
    }

    /// Log in as the seeded admin and return the access token.
    pub async fn admin_token(&self) -> String {
        let res = self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);
        res.str("access_token")
    }

    /// Create a league via the API and return its `league_id`.
    pub async fn create_league(&self, token: &str, name: &str) -> String {
        let res = self
            .post_with_token(
                routes::LEAGUES,
                &json!({
                    "league_name": name,
                    "country": "UK",
                    "season": "2024/25",
                    "status": "active",
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "create_league failed: {}", res.text);
        res.str("league_id")
    }

    /// Create a match via the API.
    pub async fn create_match(&self, token: &str, match_id: i64, league_id: &str) -> TestResponse {
        let res = self
            .post_with_token(
                routes::MATCHES,
                &json!({
                    "match_id": match_id,
                    "home_team": "Arsenal",
                    "away_team": "Chelsea",
                    "league_id": league_id,
                    "match_date": "2025-03-01T15:00:00Z",
                    "status": "scheduled",
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "create_match failed: {}", res.text);
        res
    }

    /// Create a URL submission via the API and return its `submission_id`.
    pub async fn create_submission(&self, token: &str, body: &Value) -> String {
        let res = self.post_with_token(routes::URL_SUBMISSIONS, body, token).await;
        assert_eq!(res.status, 201, "create_submission failed: {}", res.text);
        res.str("submission_id")
    }
}
