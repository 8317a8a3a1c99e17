use auction_registry::{
    app,
    config::HttpOptions,
    registry::AuctionRegistry,
    store::{AuctionStore, FileStore, MemoryStore},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::{path::PathBuf, sync::Arc};
use tower::ServiceExt;

fn unique_tmp(prefix: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("auction_registry_e2e_{}_{}", prefix, nanos))
}

fn file_app(prefix: &str) -> (Router, PathBuf) {
    let path = unique_tmp(prefix).join("dump.json");
    let registry = Arc::new(AuctionRegistry::new(FileStore::new(&path)));
    (app(registry, &HttpOptions::default()), path)
}

fn sale(auction_id: &str, title: &str) -> Value {
    json!({
        "owner": "O",
        "nft_mint": "N",
        "token_mint": "T",
        "auctionTitle": title,
        "floor": 10,
        "increment": 1,
        "biddercap": 5,
        "startTime": 1650950713,
        "endTime": 1650954313,
        "amount": 1,
        "auction_id": auction_id
    })
}

async fn send(app: &Router, request: Request<Body>) -> Value {
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post(app: &Router, route: &str, body: Value) -> Value {
    let request = Request::builder()
        .method(Method::POST)
        .uri(route)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_register_and_get_auction_info() {
    let (app, path) = file_app("register");

    let status = post(&app, "/registerAuctionInfo", sale("A1", "Sale")).await;
    assert_eq!(status, json!(0));
    assert!(path.exists());

    let info = post(&app, "/getAuctionInfo", json!({ "auction_id": "A1" })).await;
    assert_eq!(
        info,
        json!({
            "auction_id": "A1",
            "nft_mint": "N",
            "token_mint": "T",
            "auctionTitle": "Sale",
            "floor": 10,
            "increment": 1,
            "biddercap": 5,
            "startTime": 1650950713,
            "endTime": 1650954313,
            "amount": 1
        })
    );
}

#[tokio::test]
async fn test_zero_or_empty_fields_fail_validation() {
    let (app, path) = file_app("validation");

    for field in ["floor", "increment", "biddercap"] {
        let mut body = sale("A1", "Sale");
        body[field] = json!(0);
        assert_eq!(post(&app, "/registerAuctionInfo", body).await, json!(-1));
    }

    let mut body = sale("A1", "Sale");
    body["owner"] = json!("");
    assert_eq!(post(&app, "/registerAuctionInfo", body).await, json!(-1));

    assert!(!path.exists());
    assert_eq!(post(&app, "/getAllAuctionInfos", json!({})).await, json!([]));
}

#[tokio::test]
async fn test_get_auction_info_sentinels() {
    let (app, _path) = file_app("sentinels");

    assert_eq!(
        post(&app, "/getAuctionInfo", json!({ "auction_id": "never" })).await,
        json!(0)
    );
    assert_eq!(post(&app, "/getAuctionInfo", json!({})).await, json!(-1));
    assert_eq!(
        post(&app, "/getAuctionInfo", json!({ "auction_id": "" })).await,
        json!(-1)
    );
}

#[tokio::test]
async fn test_second_registration_overwrites() {
    let (app, _path) = file_app("overwrite");

    post(&app, "/registerAuctionInfo", sale("A1", "First")).await;
    let mut second = sale("A1", "Second");
    second["floor"] = json!(20);
    assert_eq!(post(&app, "/registerAuctionInfo", second).await, json!(0));

    let info = post(&app, "/getAuctionInfo", json!({ "auction_id": "A1" })).await;
    assert_eq!(info["auctionTitle"], json!("Second"));
    assert_eq!(info["floor"], json!(20));

    let all = post(&app, "/getAllAuctionInfos", json!({})).await;
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_get_all_auction_infos() {
    let (app, _path) = file_app("list");

    assert_eq!(post(&app, "/getAllAuctionInfos", json!({})).await, json!([]));

    post(&app, "/registerAuctionInfo", sale("A1", "First")).await;
    post(&app, "/registerAuctionInfo", sale("B2", "Second")).await;

    let all = post(&app, "/getAllAuctionInfos", json!({})).await;
    let listings = all.as_array().unwrap();
    assert_eq!(listings.len(), 2);

    let mut ids: Vec<_> = listings
        .iter()
        .map(|listing| listing["auction_id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["A1".to_string(), "B2".to_string()]);

    for listing in listings {
        assert_eq!(listing["owner"], json!("O"));
        assert!(listing["createdTime"].as_i64().unwrap() > 0);
    }
}

#[tokio::test]
async fn test_reads_do_not_change_the_store() {
    let (app, path) = file_app("idempotent");
    post(&app, "/registerAuctionInfo", sale("A1", "Sale")).await;
    let before = std::fs::read(&path).unwrap();

    for _ in 0..3 {
        post(&app, "/getAuctionInfo", json!({ "auction_id": "A1" })).await;
        post(&app, "/getAllAuctionInfos", json!({})).await;
    }

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn test_malformed_document_is_internal_error() {
    let dir = unique_tmp("malformed");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dump.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let registry = Arc::new(AuctionRegistry::new(FileStore::new(&path)));
    let app = app(registry, &HttpOptions::default());

    assert_eq!(
        post(&app, "/getAuctionInfo", json!({ "auction_id": "A1" })).await,
        json!(-100)
    );
    assert_eq!(post(&app, "/getAllAuctionInfos", json!({})).await, json!(-100));
}

#[tokio::test]
async fn test_zero_auction_id_is_missing() {
    let (app, path) = file_app("zero_id");

    let mut body = sale("A1", "Sale");
    body["auction_id"] = json!(0);
    assert_eq!(post(&app, "/registerAuctionInfo", body).await, json!(-1));
    assert!(!path.exists());

    assert_eq!(
        post(&app, "/getAuctionInfo", json!({ "auction_id": 0 })).await,
        json!(-1)
    );
}

#[tokio::test]
async fn test_register_keeps_unparseable_document() {
    let dir = unique_tmp("unparseable");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dump.json");
    std::fs::write(&path, "{\"OLD1\": {\"owner\": \"O\"").unwrap();

    let registry = Arc::new(AuctionRegistry::new(FileStore::new(&path)));
    let app = app(registry, &HttpOptions::default());

    assert_eq!(
        post(&app, "/registerAuctionInfo", sale("NEW", "Sale")).await,
        json!(-100)
    );
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\"OLD1\": {\"owner\": \"O\""
    );
}

#[tokio::test]
async fn test_register_preserves_non_conforming_records() {
    let dir = unique_tmp("foreign");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dump.json");
    let seeded = json!({
        "OLD1": {
            "owner": 123,
            "nft_mint": "N",
            "token_mint": "T",
            "auctionTitle": "Legacy",
            "floor": "10",
            "increment": 1,
            "biddercap": 5,
            "startTime": "soon",
            "endTime": 1650954313,
            "amount": 1,
            "createdTime": 1,
            "memo": "kept"
        },
        "OLD2": {
            "owner": "O",
            "nft_mint": "N",
            "token_mint": "T",
            "auctionTitle": "Old",
            "floor": 10,
            "increment": 1,
            "biddercap": 5,
            "startTime": 1650950713,
            "endTime": 1650954313,
            "amount": 1,
            "createdTime": 2
        }
    });
    std::fs::write(&path, seeded.to_string()).unwrap();

    let registry = Arc::new(AuctionRegistry::new(FileStore::new(&path)));
    let app = app(registry, &HttpOptions::default());

    let all = post(&app, "/getAllAuctionInfos", json!({})).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    assert_eq!(
        post(&app, "/registerAuctionInfo", sale("NEW", "Sale")).await,
        json!(0)
    );

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let mut keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["NEW".to_string(), "OLD1".to_string(), "OLD2".to_string()]);
    assert_eq!(document["OLD1"], seeded["OLD1"]);

    let info = post(&app, "/getAuctionInfo", json!({ "auction_id": "OLD1" })).await;
    assert_eq!(info["floor"], json!("10"));
    assert_eq!(info["auctionTitle"], json!("Legacy"));

    let all = post(&app, "/getAllAuctionInfos", json!({})).await;
    let legacy = all
        .as_array()
        .unwrap()
        .iter()
        .find(|listing| listing["auction_id"] == json!("OLD1"))
        .unwrap();
    assert_eq!(legacy["memo"], json!("kept"));
    assert_eq!(legacy["owner"], json!(123));
}

#[tokio::test]
async fn test_form_encoded_registration() {
    let store = Arc::new(AuctionRegistry::new(MemoryStore::default()));
    let app = app(store, &HttpOptions::default());

    let form = "owner=O&nft_mint=N&token_mint=T&auctionTitle=Sale&floor=10&increment=1\
                &biddercap=5&startTime=1650950713&endTime=1650954313&amount=1&auction_id=A1";
    let request = Request::builder()
        .method(Method::POST)
        .uri("/registerAuctionInfo")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    assert_eq!(send(&app, request).await, json!(0));

    let info = post(&app, "/getAuctionInfo", json!({ "auction_id": "A1" })).await;
    assert_eq!(info["floor"], json!(10));
    assert_eq!(info["startTime"], json!("1650950713"));
}

#[tokio::test]
async fn test_unreadable_body_fails_validation() {
    let (app, _path) = file_app("garbage");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/registerAuctionInfo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nope"))
        .unwrap();
    assert_eq!(send(&app, request).await, json!(-1));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/getAuctionInfo")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, request).await, json!(-1));
}

#[tokio::test]
async fn test_concurrent_registrations_survive() {
    let (app, path) = file_app("concurrent");

    let tasks: Vec<_> = (0..12)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                post(&app, "/registerAuctionInfo", sale(&format!("auction-{i}"), "Sale")).await
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), json!(0));
    }

    let stored = FileStore::new(&path).load().unwrap();
    assert_eq!(stored.len(), 12);
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let (app, _path) = file_app("cors");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/getAllAuctionInfos")
        .header(header::ORIGIN, "http://somewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/registerAuctionInfo")
        .header(header::ORIGIN, "http://somewhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allow_list_restricts_origins() {
    let registry = Arc::new(AuctionRegistry::new(MemoryStore::default()));
    let options = HttpOptions {
        cors_origins: vec!["http://localhost:8001".to_string()],
        public_dir: None,
    };
    let app = app(registry, &options);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/getAllAuctionInfos")
        .header(header::ORIGIN, "http://localhost:8001")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:8001"
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri("/getAllAuctionInfos")
        .header(header::ORIGIN, "http://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_public_dir_serves_unrouted_paths() {
    let dir = unique_tmp("public");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>auctions</h1>").unwrap();

    let registry = Arc::new(AuctionRegistry::new(MemoryStore::default()));
    let options = HttpOptions {
        cors_origins: Vec::new(),
        public_dir: Some(dir),
    };
    let app = app(registry, &options);

    let request = Request::builder()
        .uri("/index.html")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>auctions</h1>");
}
