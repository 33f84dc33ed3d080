//! End-to-end tests of the helpers through the diagnostics server.

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use mvc_helper::config::HelperConfig;
use mvc_helper::net::SharedResolver;
use mvc_helper::{HttpServer, Shutdown};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::StubResolver;

fn server(config: HelperConfig, resolver: StubResolver) -> HttpServer {
    let resolver: SharedResolver = Arc::new(resolver);
    HttpServer::with_resolver(config, resolver)
}

fn get(uri: &str, peer: Option<&str>) -> Request<Body> {
    let mut req = Request::builder()
        .uri(uri)
        .header("Host", "library.test")
        .body(Body::empty())
        .unwrap();
    if let Some(peer) = peer {
        req.extensions_mut()
            .insert(ConnectInfo::<SocketAddr>(peer.parse().unwrap()));
    }
    req
}

async fn send(server: &HttpServer, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = server.router().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(server: &HttpServer, req: Request<Body>) -> Value {
    let (status, body) = send(server, req).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_site_urls() {
    let mut config = HelperConfig::default();
    config.site.path_base = "/app".into();
    let server = server(config, StubResolver::new());

    let json = send_json(&server, get("/", None)).await;
    assert_eq!(json["host_url"], "http://library.test");
    assert_eq!(json["application_url"], "http://library.test/app/");
}

#[tokio::test]
async fn test_routing_and_loopback_client() {
    let server = server(HelperConfig::default(), StubResolver::loopback());

    let json = send_json(&server, get("/books/details", Some("[::1]:50123"))).await;
    assert_eq!(json["area"], "");
    assert_eq!(json["controller"], "books");
    assert_eq!(json["action"], "details");
    assert_eq!(json["user_host_address"], "::1");
    assert_eq!(json["client_ip"], "127.0.0.1");
    assert!(json["client_ip"]
        .as_str()
        .unwrap()
        .parse::<std::net::Ipv4Addr>()
        .is_ok());
    assert_eq!(json["client_hostname"], "localhost");
}

#[tokio::test]
async fn test_area_route() {
    let server = server(HelperConfig::default(), StubResolver::loopback());

    let json = send_json(&server, get("/admin/users/edit", Some("127.0.0.1:40000"))).await;
    assert_eq!(json["area"], "admin");
    assert_eq!(json["controller"], "users");
    assert_eq!(json["action"], "edit");
    assert_eq!(json["client_ip"], "127.0.0.1");
}

#[tokio::test]
async fn test_unknown_client() {
    let server = server(HelperConfig::default(), StubResolver::new());

    let json = send_json(&server, get("/catalog/search", None)).await;
    assert_eq!(json["user_host_address"], "");
    assert_eq!(json["client_ip"], "");
    assert_eq!(json["client_hostname"], "");
}

#[tokio::test]
async fn test_forwarded_client_unresolvable() {
    let mut config = HelperConfig::default();
    config.site.trust_forwarded_headers = true;
    let server = server(config, StubResolver::new());

    let mut req = get("/catalog/search", Some("10.0.0.2:8000"));
    req.headers_mut()
        .insert("x-forwarded-for", "203.0.113.50, 10.0.0.2".parse().unwrap());

    let json = send_json(&server, req).await;
    assert_eq!(json["user_host_address"], "203.0.113.50");
    assert_eq!(json["client_ip"], "203.0.113.50");
    assert_eq!(json["client_hostname"], "");
}

#[tokio::test]
async fn test_echo_raw_body() {
    let mut config = HelperConfig::default();
    config.body.max_size = 32;
    let server = server(config, StubResolver::new());

    let payload = "title=Dune&author=Herbert";
    let req = Request::builder()
        .method("POST")
        .uri("/echo")
        .body(Body::from(payload))
        .unwrap();
    let (status, body) = send(&server, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload.as_bytes());

    let req = Request::builder()
        .method("POST")
        .uri("/echo")
        .body(Body::from(vec![b'x'; 64]))
        .unwrap();
    let (status, body) = send(&server, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let server = server(HelperConfig::default(), StubResolver::new());
    let res = server.router().oneshot(get("/", None)).await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_live_server() {
    let server = server(HelperConfig::default(), StubResolver::loopback());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let json: Value = client
        .get(format!("http://{addr}/orders/list"))
        .send()
        .await
        .expect("server unreachable")
        .json()
        .await
        .unwrap();
    assert_eq!(json["controller"], "orders");
    assert_eq!(json["action"], "list");
    assert_eq!(json["user_host_address"], "127.0.0.1");
    assert_eq!(json["client_ip"], "127.0.0.1");
    assert_eq!(json["client_hostname"], "localhost");

    let json: Value = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["host_url"], format!("http://{addr}"));

    let echoed = client
        .post(format!("http://{addr}/echo"))
        .body("{\"isbn\":\"9780441013593\"}")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(echoed, "{\"isbn\":\"9780441013593\"}");

    shutdown.trigger();
    handle.await.unwrap().unwrap();
}
