//! Endpoint tests against a live server on an ephemeral port.

use std::sync::Arc;

use finsolve_app_server::{AppState, StaticCredentialStore, UserRecord, build_router};
use finsolve_embeddings::{EmbeddingProvider, HashingEmbedder};
use finsolve_ollama::{OllamaClient, OllamaConfig};
use finsolve_retrieval::RoleScopedRetriever;
use finsolve_vector_store::{ChunkMetadata, NewChunk, VectorStore};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    _index_dir: TempDir,
}

impl TestServer {
    async fn get(&self, route: &str, credentials: Option<(&str, &str)>) -> reqwest::Response {
        let mut request = self.client.get(format!("{}{route}", self.base_url));
        if let Some((username, password)) = credentials {
            request = request.basic_auth(username, Some(password));
        }
        request.send().await.unwrap()
    }

    async fn chat(&self, body: impl Into<reqwest::Body>) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }
}

async fn start(ollama_url: &str) -> TestServer {
    let index_dir = TempDir::new().unwrap();
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HashingEmbedder::new(64));
    let chunks = vec![
        NewChunk::new(
            "Q1 budget: vendor services received 40% of spend",
            ChunkMetadata::new("finance", "finance"),
        ),
        NewChunk::new(
            "Holiday policy grants 20 days of paid leave",
            ChunkMetadata::new("general", "general"),
        ),
    ];
    let store = VectorStore::create(index_dir.path(), "company_docs", embedder, chunks, 8)
        .await
        .unwrap();

    let state = Arc::new(AppState::new(
        RoleScopedRetriever::new(Arc::new(store)),
        Arc::new(StaticCredentialStore::new([
            UserRecord::new("Kiran", "finsecure", "finance"),
            UserRecord::new("Nina", "genaccess", "employee"),
        ])),
        Arc::new(OllamaClient::new(
            OllamaConfig::default().with_base_url(ollama_url),
        )),
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        _index_dir: index_dir,
    }
}

async fn ollama(status: u16, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_login_and_test_endpoints() {
    let backend = MockServer::start().await;
    let server = start(&backend.uri()).await;

    let response = server.get("/login", Some(("Kiran", "finsecure"))).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "message": "Welcome Kiran!", "role": "finance" })
    );

    let response = server.get("/test", Some(("Nina", "genaccess"))).await;
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "message": "Hello Nina! You can now chat.", "role": "employee" })
    );
}

#[tokio::test]
async fn test_invalid_credentials() {
    let backend = MockServer::start().await;
    let server = start(&backend.uri()).await;

    for credentials in [Some(("Kiran", "wrong")), Some(("Ghost", "x")), None] {
        let response = server.get("/login", credentials).await;
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(
            response.headers().get("www-authenticate").unwrap(),
            "Basic"
        );
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({ "detail": "Invalid credentials" })
        );
    }
}

#[tokio::test]
async fn test_health() {
    let backend = MockServer::start().await;
    let server = start(&backend.uri()).await;

    let response = server.get("/health", None).await;
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "status": "ok", "chunks": 2 })
    );
}

#[tokio::test]
async fn test_chat_answers_from_role_documents() {
    let backend = ollama(200, json!({ "response": "Vendor services got 40%." })).await;
    let server = start(&backend.uri()).await;

    let (status, body) = server
        .chat(
            json!({
                "user": { "username": "Kiran", "role": "finance" },
                "message": "Q1 budget"
            })
            .to_string(),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "username": "Kiran",
            "role": "finance",
            "query": "Q1 budget",
            "response": "Vendor services got 40%."
        })
    );

    let requests = backend.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["prompt"].as_str().unwrap();
    assert!(prompt.contains("The user has the role: finance."));
    assert!(prompt.contains("Context:\nQ1 budget: vendor services received 40% of spend"));
    assert!(!prompt.contains("Holiday policy"));
}

#[tokio::test]
async fn test_chat_without_visible_documents() {
    let backend = ollama(200, json!({ "response": "unused" })).await;
    let server = start(&backend.uri()).await;

    let (status, body) = server
        .chat(
            json!({
                "user": { "username": "Meera", "role": "marketing" },
                "message": "campaign results"
            })
            .to_string(),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "response": "No relevant data found for your role: marketing" })
    );
    assert!(backend.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_backend_failure_is_inline() {
    let backend = ollama(500, json!({ "error": "model not loaded" })).await;
    let server = start(&backend.uri()).await;

    let (status, body) = server
        .chat(
            json!({
                "user": { "username": "Nina", "role": "employee" },
                "message": "holiday policy"
            })
            .to_string(),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["username"], "Nina");
    assert_eq!(body["query"], "holiday policy");
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with("Ollama LLM error:"));
    assert!(response.contains("model not loaded"));
}

#[tokio::test]
async fn test_chat_malformed_body() {
    let backend = MockServer::start().await;
    let server = start(&backend.uri()).await;

    let (status, body) = server.chat(r#"{"message": "no user"}"#).await;
    assert_eq!(status, 200);
    assert!(
        body["response"]
            .as_str()
            .unwrap()
            .starts_with("Error during chat: ")
    );
}

#[tokio::test]
async fn test_chat_oversized_body_still_answers_200() {
    let backend = MockServer::start().await;
    let server = start(&backend.uri()).await;

    let message = "a".repeat(3 * 1024 * 1024);
    let (status, body) = server
        .chat(
            json!({
                "user": { "username": "Kiran", "role": "finance" },
                "message": message
            })
            .to_string(),
        )
        .await;

    assert_eq!(status, 200);
    assert!(
        body["response"]
            .as_str()
            .unwrap()
            .starts_with("Error during chat: ")
    );
    assert!(backend.received_requests().await.unwrap().is_empty());
}
