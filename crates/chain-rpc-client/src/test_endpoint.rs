//! In-process JSON-RPC endpoint for tests

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{routing::post, Json, Router};
use route_core::RpcConfig;
use serde_json::{json, Value};

use crate::RpcClient;

type Handler = Arc<dyn Fn(&str, &Value) -> Value + Send + Sync>;

/// Answers every request with `handler(method, params)` merged into a
/// JSON-RPC envelope
pub struct TestEndpoint {
    addr: SocketAddr,
    calls: Arc<AtomicUsize>,
}

impl TestEndpoint {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let app = Router::new().route(
            "/",
            post(move |Json(body): Json<Value>| {
                let handler = handler.clone();
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let method = body["method"].as_str().unwrap_or_default().to_string();
                    let mut response = handler(&method, &body["params"]);
                    response["jsonrpc"] = json!("2.0");
                    response["id"] = body["id"].clone();
                    Json(response)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test endpoint");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, calls }
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn client(&self) -> RpcClient {
        RpcClient::new(&RpcConfig {
            url: self.url(),
            request_timeout_secs: 5,
        })
        .expect("client")
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
