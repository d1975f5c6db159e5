use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = sitestock_api::app::build_app();
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

#[tokio::test]
async fn health_endpoint_responds() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn registration_and_login_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/register", srv.base_url))
        .json(&json!({ "username": "alice", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Second registration under the same username conflicts.
    let res = client
        .post(format!("{}/api/register", srv.base_url))
        .json(&json!({ "username": "alice", "password": "other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    let res = client
        .post(format!("{}/api/login", srv.base_url))
        .json(&json!({ "username": "alice", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/login", srv.base_url))
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Unknown user yields the exact same error body as a wrong password.
    let wrong_password: serde_json::Value = client
        .post(format!("{}/api/login", srv.base_url))
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let unknown_user: serde_json::Value = client
        .post(format!("{}/api/login", srv.base_url))
        .json(&json!({ "username": "nobody", "password": "wrong" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn registration_rejects_empty_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/register", srv.base_url))
        .json(&json!({ "username": "", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn missing_body_fields_are_400_validation_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // No password key at all.
    let res = client
        .post(format!("{}/api/register", srv.base_url))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // Same contract on inventory updates.
    client
        .post(format!("{}/api/projects", srv.base_url))
        .json(&json!({ "name": "bridge" }))
        .send()
        .await
        .unwrap();
    let res = client
        .put(format!("{}/api/projects/bridge/inventory", srv.base_url))
        .json(&json!({ "name": "bolt", "action": "add" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn project_inventory_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/projects", srv.base_url))
        .json(&json!({ "name": "bridge" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // New project starts with an empty inventory.
    let projects: serde_json::Value = client
        .get(format!("{}/api/projects", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(projects[0]["name"], "bridge");
    assert_eq!(projects[0]["inventory"].as_array().unwrap().len(), 0);

    let res = client
        .put(format!("{}/api/projects/bridge/inventory", srv.base_url))
        .json(&json!({ "name": "bolt", "action": "add", "quantity": 50 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Removing more than stocked fails and leaves the inventory alone.
    let res = client
        .put(format!("{}/api/projects/bridge/inventory", srv.base_url))
        .json(&json!({ "name": "bolt", "action": "remove", "quantity": 60 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let projects: serde_json::Value = client
        .get(format!("{}/api/projects", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let inventory = projects[0]["inventory"].as_array().unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0]["name"], "bolt");
    assert_eq!(inventory[0]["quantity"], 50);

    // No storage internals leak into the listing.
    assert!(projects[0].get("_id").is_none());
    assert!(projects[0].get("doc_id").is_none());
    assert!(projects[0].get("version").is_none());
}

#[tokio::test]
async fn inventory_update_on_unknown_project_is_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/api/projects/ghost/inventory", srv.base_url))
        .json(&json!({ "name": "bolt", "action": "add", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resource_quantity_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/resources", srv.base_url))
        .json(&json!({ "name": "steel", "max_units": 100 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Created at full capacity.
    let resources: serde_json::Value = client
        .get(format!("{}/api/resources", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resources[0]["available_quantity"], 100);

    let res = client
        .put(format!("{}/api/resources/steel/quantity", srv.base_url))
        .json(&json!({ "change": -30 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["available_quantity"], 70);

    // -80 from 70 would underflow; quantity stays at 70.
    let res = client
        .put(format!("{}/api/resources/steel/quantity", srv.base_url))
        .json(&json!({ "change": -80 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Replenishing past max_units also fails.
    let res = client
        .put(format!("{}/api/resources/steel/quantity", srv.base_url))
        .json(&json!({ "change": 31 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let resources: serde_json::Value = client
        .get(format!("{}/api/resources", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resources[0]["available_quantity"], 70);
}

#[tokio::test]
async fn resource_creation_validates_and_deduplicates() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/resources", srv.base_url))
        .json(&json!({ "name": "steel", "max_units": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .post(format!("{}/api/resources", srv.base_url))
        .json(&json!({ "name": "steel", "max_units": 100 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/api/resources", srv.base_url))
        .json(&json!({ "name": "steel", "max_units": 50 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn required_quantity_endpoint() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/resources", srv.base_url))
        .json(&json!({ "name": "steel", "max_units": 100 }))
        .send()
        .await
        .unwrap();

    let res = client
        .put(format!("{}/api/resources/steel/required", srv.base_url))
        .json(&json!({ "quantity": 640 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let resources: serde_json::Value = client
        .get(format!("{}/api/resources", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resources[0]["required_quantity"], 640);

    // Unknown resource is reported, not silently written.
    let res = client
        .put(format!("{}/api/resources/ghost/required", srv.base_url))
        .json(&json!({ "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
