//! Black-box tests driving the full router over a real socket.

use bookstore_kernel::settings::Settings;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(Settings::default()).await
    }

    async fn spawn_with(settings: Settings) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = bookstore_app::build_app(&settings);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn balance(&self) -> f64 {
        let res = self.client.get(self.url("/balance")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json::<f64>().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn assert_money(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let server = TestServer::spawn().await;

    let res = server.client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");

    let res = server
        .client
        .get(server.url("/docs/openapi.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    assert!(doc["paths"]["/books/checkout"]["patch"].is_object());
    assert!(doc["paths"]["/books"]["post"].is_object());
    assert!(doc["paths"]["/balance"]["get"].is_object());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = TestServer::spawn().await;
    let res = server.client.get(server.url("/books")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn opening_balance_is_one_hundred() {
    let server = TestServer::spawn().await;
    assert_money(server.balance().await, 100.0);
}

#[tokio::test]
async fn get_book_by_id() {
    let server = TestServer::spawn().await;

    let res = server.client.get(server.url("/books/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let book: Value = res.json().await.unwrap();
    assert_eq!(
        book,
        json!({"id": 2, "title": "Book 2", "author": "Author 2", "price": 25.2, "quantity": 2})
    );

    let res = server.client.get(server.url("/books/x1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.client.get(server.url("/books/404")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "book not found");
}

#[tokio::test]
async fn add_book_then_find_it() {
    let server = TestServer::spawn().await;
    let new_book = json!({
        "id": 4,
        "title": "Book 4",
        "author": "Author 4",
        "price": 45.5,
        "quantity": 0
    });

    let res = server
        .client
        .post(server.url("/books"))
        .json(&new_book)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), new_book);

    let books: Vec<Value> = server
        .client
        .get(server.url("/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(books.len(), 4);
    assert_eq!(books[3], new_book);
}

#[tokio::test]
async fn add_book_with_wrong_types_is_bad_request() {
    let server = TestServer::spawn().await;
    let res = server
        .client
        .post(server.url("/books"))
        .json(&json!({"id": "four", "title": "t", "author": "a", "price": 1, "quantity": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn checkout_down_to_zero_then_unavailable() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .patch(server.url("/books/checkout?id=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap()["quantity"], 0);

    let res = server
        .client
        .patch(server.url("/books/checkout?id=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await.unwrap()["error"],
        "Book not available"
    );

    let res = server
        .client
        .patch(server.url("/books/return?id=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap()["quantity"], 1);
}

#[tokio::test]
async fn query_id_is_required_and_numeric() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .patch(server.url("/books/return"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await.unwrap()["error"], "id is required");

    let res = server
        .client
        .post(server.url("/books/buy?id=two"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .delete(server.url("/books/burn?id=77"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn buy_credits_purse() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .post(server.url("/books/buy?id=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap()["quantity"], 1);
    assert_money(server.balance().await, 125.2);
}

#[tokio::test]
async fn sell_debits_three_quarters_of_price() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .post(server.url("/books/sell?id=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap()["quantity"], 2);
    assert_money(server.balance().await, 88.6);
}

#[tokio::test]
async fn sell_with_empty_purse_conflicts() {
    let mut settings = Settings::default();
    settings.store.opening_balance = rust_decimal::Decimal::ZERO;
    let server = TestServer::spawn_with(settings).await;

    let res = server
        .client
        .post(server.url("/books/sell?id=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(
        res.json::<Value>().await.unwrap()["error"],
        "Not enough money"
    );
    assert_money(server.balance().await, 0.0);
}

#[tokio::test]
async fn burn_returns_snapshot_and_forgets_book() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .delete(server.url("/books/burn?id=3"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"id": 3, "title": "Book 3", "author": "Author 3", "price": 35.2, "quantity": 3})
    );

    let res = server.client.get(server.url("/books/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_buys_stop_at_empty_shelf() {
    let server = TestServer::spawn().await;

    let requests = (0..20).map(|_| {
        let client = server.client.clone();
        let url = server.url("/books/buy?id=3");
        tokio::spawn(async move { client.post(url).send().await.unwrap().status() })
    });

    let mut sold = 0;
    for request in requests.collect::<Vec<_>>() {
        if request.await.unwrap() == StatusCode::OK {
            sold += 1;
        }
    }

    assert_eq!(sold, 3);
    assert_money(server.balance().await, 100.0 + 3.0 * 35.2);
}
