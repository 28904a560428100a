use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use storefront_infra::{ShopService, StoreConfig};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    data_dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, backed by JSON files in a throwaway directory.
        let data_dir = tempfile::tempdir().expect("failed to create temp dir");
        let services = Arc::new(ShopService::from_config(&StoreConfig::new(data_dir.path())));
        let app = storefront_api::app::build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handle,
            data_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn read_document(&self, name: &str) -> Value {
        let raw = std::fs::read_to_string(self.data_dir.path().join(name)).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn product_body(code: &str, stock: u64) -> Value {
    json!({
        "title": "Termo",
        "description": "Stainless steel thermos",
        "code": code,
        "price": 25000,
        "stock": stock,
        "category": "kitchen",
        "thumbnails": ["termo-front.png"],
    })
}

async fn send(req: reqwest::RequestBuilder) -> (StatusCode, Value) {
    let res = req.send().await.unwrap();
    let status = res.status();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"].as_u64(), Some(u64::from(status.as_u16())));
    (status, body)
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_enveloped_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (status, body) = send(client.get(srv.url("/nope"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Route not found.");
}

#[tokio::test]
async fn product_crud_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = send(client.post(srv.url("/products")).json(&product_body("T-1", 10))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["response"]["id"], 1);
    assert_eq!(body["response"]["status"], true);

    let (status, body) = send(client.post(srv.url("/products")).json(&product_body("T-1", 3))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["response"], "Product code already exists.");

    let (status, body) = send(client.post(srv.url("/products")).json(&json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["response"], "All fields are required.");

    send(client.post(srv.url("/products")).json(&product_body("T-2", 4))).await;
    send(client.post(srv.url("/products")).json(&product_body("T-3", 4))).await;

    let (status, body) = send(client.get(srv.url("/products?limit=2"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"].as_array().unwrap().len(), 2);

    let (status, body) = send(client.get(srv.url("/products/2"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["code"], "T-2");

    let (status, body) = send(client.get(srv.url("/products/42"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Product with id 42 not found.");

    let (status, body) = send(
        client
            .put(srv.url("/products/2"))
            .json(&json!({"code": "T-2", "price": 30000, "status": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["price"], 30000.0);
    assert_eq!(body["response"]["status"], false);
    assert_eq!(body["response"]["title"], "Termo");

    let (status, body) = send(client.put(srv.url("/products/2")).json(&json!({"code": "OTHER"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["response"], "Cannot modify product code.");

    let (status, body) = send(client.delete(srv.url("/products/1"))).await;
    assert_eq!(status, StatusCode::OK);
    let remaining: Vec<u64> = body["response"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(remaining, vec![2, 3]);

    let stored = srv.read_document("products.json");
    assert_eq!(stored.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn cart_reconciliation_scenario() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    send(client.post(srv.url("/products")).json(&product_body("T-1", 10))).await;
    let (status, body) = send(client.post(srv.url("/carts"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["response"], json!({"id": 1, "products": []}));

    let (status, body) = send(client.put(srv.url("/carts/1/product/1/4"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["products"], json!([{"id": 1, "units": 4}]));

    let (status, body) = send(client.put(srv.url("/carts/1/product/1/4"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["products"], json!([{"id": 1, "units": 8}]));
    let (_, body) = send(client.get(srv.url("/products/1"))).await;
    assert_eq!(body["response"]["stock"], 2);

    let carts_before = srv.read_document("carts.json");
    let products_before = srv.read_document("products.json");

    let (status, body) = send(client.put(srv.url("/carts/1/product/1/5"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["response"], "There are not enough units of the product T-1.");
    assert_eq!(srv.read_document("carts.json"), carts_before);
    assert_eq!(srv.read_document("products.json"), products_before);

    let (status, body) = send(client.delete(srv.url("/carts/1/product/99/1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Product with id 99 not found in cart 1.");

    let (status, body) = send(client.delete(srv.url("/carts/1/product/1/9"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["response"],
        "There are not enough units of the product T-1 to delete."
    );

    let (status, body) = send(client.delete(srv.url("/carts/1/product/1/8"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Product with id 1 removed from cart 1.");

    let (_, body) = send(client.get(srv.url("/carts/1"))).await;
    assert_eq!(body["response"]["products"], json!([]));
    let (_, body) = send(client.get(srv.url("/products/1"))).await;
    assert_eq!(body["response"]["stock"], 10);
}

#[tokio::test]
async fn cart_lookup_and_bad_path_segments() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = send(client.get(srv.url("/carts/7"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Cart with id 7 not found.");

    send(client.post(srv.url("/carts"))).await;
    send(client.post(srv.url("/carts"))).await;
    let (_, body) = send(client.get(srv.url("/carts"))).await;
    assert_eq!(body["response"].as_array().unwrap().len(), 2);

    let (status, body) = send(client.put(srv.url("/carts/1/product/1/0"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["response"], "units must be a positive integer");

    let (status, _) = send(client.put(srv.url("/carts/1/product/1/-2"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(client.get(srv.url("/carts/abc"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Cart with id abc not found.");

    let (status, body) = send(client.get(srv.url("/products/0"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Product with id 0 not found.");

    let (status, body) = send(client.delete(srv.url("/carts/1/product/x/1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Product with id x not found.");

    let (status, body) = send(client.put(srv.url("/carts/9/product/1/1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["response"], "Cart with id 9 not found.");
}

#[tokio::test]
async fn reserved_product_cannot_be_deleted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    send(client.post(srv.url("/products")).json(&product_body("T-1", 5))).await;
    send(client.post(srv.url("/carts"))).await;
    send(client.put(srv.url("/carts/1/product/1/2"))).await;

    let (status, _) = send(client.delete(srv.url("/products/1"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(client.delete(srv.url("/carts/1/product/1/2"))).await;
    let (status, body) = send(client.delete(srv.url("/products/1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], json!([]));
}

#[tokio::test]
async fn corrupt_document_is_an_internal_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    std::fs::write(srv.data_dir.path().join("carts.json"), "{not json").unwrap();

    let (status, body) = send(client.get(srv.url("/carts"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["response"], "Internal server error.");

    let (status, _) = send(client.post(srv.url("/carts"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        std::fs::read_to_string(srv.data_dir.path().join("carts.json")).unwrap(),
        "{not json"
    );
}
