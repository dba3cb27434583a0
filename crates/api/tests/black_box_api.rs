use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the app with its default wiring (in-memory stores, scripted
        // model), but bind to an ephemeral port.
        let app = larder_api::app::build_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn batch(items: &[(&str, f64, &str)]) -> serde_json::Value {
    json!({
        "items": items
            .iter()
            .map(|(name, amount, unit)| json!({"name": name, "amount": amount, "unit": unit}))
            .collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn pantry_lifecycle_restock_consume_snapshot() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Restock two new entries.
    let res = client
        .post(format!("{}/pantry/restock", srv.base_url))
        .json(&batch(&[("flour", 500.0, "g"), ("egg", 2.0, "pcs")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let saved: serde_json::Value = res.json().await.unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 2);
    let flour_id = saved[0]["id"].as_str().unwrap().to_string();
    assert_eq!(saved[0]["name"], "flour");
    assert_eq!(saved[0]["amount"], 500.0);

    // Restocking again replaces the amount and keeps the id stable.
    let res = client
        .post(format!("{}/pantry/restock", srv.base_url))
        .json(&batch(&[("flour", 250.0, "g")]))
        .send()
        .await
        .unwrap();
    let saved: serde_json::Value = res.json().await.unwrap();
    assert_eq!(saved[0]["id"].as_str().unwrap(), flour_id);
    assert_eq!(saved[0]["amount"], 250.0);

    // Consume part of the flour.
    let res = client
        .post(format!("{}/pantry/consume", srv.base_url))
        .json(&batch(&[("flour", 100.0, "g")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let saved: serde_json::Value = res.json().await.unwrap();
    assert_eq!(saved[0]["amount"], 150.0);

    // Consuming exactly the rest drives it to zero, not an error.
    let res = client
        .post(format!("{}/pantry/consume", srv.base_url))
        .json(&batch(&[("egg", 2.0, "pcs")]))
        .send()
        .await
        .unwrap();
    let saved: serde_json::Value = res.json().await.unwrap();
    assert_eq!(saved[0]["amount"], 0.0);

    // Snapshot shows both entries.
    let res = client
        .get(format!("{}/pantry", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let snapshot: serde_json::Value = res.json().await.unwrap();
    assert_eq!(snapshot.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unit_mismatch_maps_to_unprocessable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/pantry/restock", srv.base_url))
        .json(&batch(&[("flour", 500.0, "g")]))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/pantry/consume", srv.base_url))
        .json(&batch(&[("flour", 1.0, "kg")]))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unit_mismatch");

    // The mismatch wrote nothing.
    let snapshot: serde_json::Value = client
        .get(format!("{}/pantry", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot[0]["amount"], 500.0);
}

#[tokio::test]
async fn insufficient_stock_maps_to_unprocessable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/pantry/restock", srv.base_url))
        .json(&batch(&[("rice", 500.0, "g")]))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/pantry/consume", srv.base_url))
        .json(&batch(&[("rice", 1000.0, "g")]))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");
}

#[tokio::test]
async fn consuming_an_unknown_name_is_skipped_not_failed() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/pantry/consume", srv.base_url))
        .json(&batch(&[("sugar", 100.0, "g")]))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let saved: serde_json::Value = res.json().await.unwrap();
    assert!(saved.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn negative_amounts_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/pantry/restock", srv.base_url))
        .json(&batch(&[("flour", -5.0, "g")]))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn curl_chat_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/curl/chat", srv.base_url))
        .json(&json!({"message": "what's in my pantry?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(!body["reply"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn curl_chat_without_message_is_a_client_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/curl/chat", srv.base_url))
        .json(&json!({"wrong_field": "test"}))
        .send()
        .await
        .unwrap();

    assert!(res.status().is_client_error());
}

#[tokio::test]
async fn ollama_chat_replies_to_the_last_message() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/ollama/api/chat", srv.base_url))
        .json(&json!({
            "model": "larder:latest",
            "stream": false,
            "messages": [
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi"},
                {"role": "user", "content": "what are you?"}
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["model"], "larder");
    assert_eq!(body["message"]["role"], "assistant");
    assert!(!body["message"]["content"].as_str().unwrap().is_empty());
    assert_eq!(body["done"], true);
    assert_eq!(body["done_reason"], "stop");
}

#[tokio::test]
async fn ollama_chat_with_no_messages_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/ollama/api/chat", srv.base_url))
        .json(&json!({"messages": []}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ollama_catalog_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/ollama/api/tags", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["models"][0]["name"], "larder:latest");

    let res = client
        .get(format!("{}/api/models", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["models"][0]["id"], "larder:latest");

    let res = client
        .get(format!("{}/ollama/api/version", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let res = client
        .get(format!("{}/ollama/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_ollama_paths_are_unprocessable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/ollama/api/does-not-exist", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
