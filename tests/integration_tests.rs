use auction_simulator::clock::MockClock;
use auction_simulator::config::SystemConfig;
use auction_simulator::handlers::{self, SESSION_HEADER};
use auction_simulator::system::AuctionSystem;
use axum::http::StatusCode;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 트레이싱 초기화
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// 테스트 서버 실행 (임의 포트)
async fn setup(config: SystemConfig) -> (String, MockClock) {
    init_tracing();
    let clock = MockClock::new(t0());
    let system = Arc::new(AuctionSystem::with_clock(config, Arc::new(clock.clone())));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, handlers::routes(system).into_make_service())
            .await
            .unwrap();
    });
    (format!("http://{addr}"), clock)
}

/// 회원 가입 후 로그인하여 세션 토큰을 돌려준다
async fn register_and_login(client: &Client, base: &str, username: &str) -> String {
    let response = client
        .post(format!("{base}/users"))
        .json(&json!({
            "username": username,
            "password": "pw",
            "email": format!("{username}@example.com"),
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let session: Value = client
        .post(format!("{base}/login"))
        .json(&json!({ "username": username, "password": "pw" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .unwrap();
    session["token"].as_str().unwrap().to_string()
}

/// 테스트용 경매 생성 (t0 부터 1시간)
async fn create_test_auction(client: &Client, base: &str, token: &str, min_bid: f64) -> u64 {
    let response = client
        .post(format!("{base}/auctions"))
        .header(SESSION_HEADER, token)
        .json(&json!({
            "title": "Vintage lamp",
            "description": "Brass, 1960s",
            "min_bid": min_bid,
            "start_time": t0(),
            "end_time": t0() + Duration::seconds(3600),
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    body["auction_id"].as_u64().unwrap()
}

async fn bid(client: &Client, base: &str, token: Option<&str>, auction_id: u64, amount: f64) -> (StatusCode, Value) {
    let mut request = client
        .post(format!("{base}/bid"))
        .json(&json!({ "auction_id": auction_id, "bid_amount": amount }));
    if let Some(token) = token {
        request = request.header(SESSION_HEADER, token);
    }
    let response = request.send().await.expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap())
}

/// 입찰 시나리오 테스트
#[tokio::test]
async fn test_bid_scenario() {
    let (base, clock) = setup(SystemConfig::default()).await;
    let client = Client::new();
    let alice = register_and_login(&client, &base, "alice").await;
    let bob = register_and_login(&client, &base, "bob").await;
    let auction_id = create_test_auction(&client, &base, &alice, 10.0).await;
    assert_eq!(auction_id, 1);

    // 최소 입찰가 미만이어도 0보다 크면 수락된다
    clock.set(t0() + Duration::seconds(10));
    let (status, body) = bid(&client, &base, Some(&bob), auction_id, 5.0).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["receipt"]["current_price"], 5.0);

    clock.set(t0() + Duration::seconds(20));
    let (status, body) = bid(&client, &base, Some(&alice), auction_id, 3.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "LOW_BID");

    clock.set(t0() + Duration::seconds(30));
    let (status, _) = bid(&client, &base, Some(&alice), auction_id, 50.0).await;
    assert_eq!(status, StatusCode::OK);

    // 같은 금액은 거절
    clock.set(t0() + Duration::seconds(40));
    let (status, body) = bid(&client, &base, Some(&bob), auction_id, 50.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "LOW_BID");

    let auction: Value = client
        .get(format!("{base}/auctions/{auction_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(auction["highest_bid"], 50.0);
    assert_eq!(auction["highest_bidder"], "alice");
    assert_eq!(auction["status"], "ACTIVE");

    let history: Value = client
        .get(format!("{base}/auctions/{auction_id}/bids"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        history,
        json!([
            { "amount": 5.0, "bidder": "bob" },
            { "amount": 50.0, "bidder": "alice" },
        ])
    );

    // 종료 후 입찰은 금액과 무관하게 거절
    clock.set(t0() + Duration::seconds(3700));
    let (status, body) = bid(&client, &base, Some(&bob), auction_id, 10_000.0).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_AVAILABLE");

    let listing = client
        .get(format!("{base}/auctions/listing"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(listing.contains("Status: Closed"));
    assert!(listing.contains("Minimum Bid: 10.0\n"));
    assert!(listing.contains("  bob bid 5.0\n  alice bid 50.0\n"));
}

/// 세션 없는 입찰 테스트
#[tokio::test]
async fn test_bid_requires_session() {
    let (base, _) = setup(SystemConfig::default()).await;
    let client = Client::new();
    let alice = register_and_login(&client, &base, "alice").await;
    let auction_id = create_test_auction(&client, &base, &alice, 0.0).await;

    let (status, body) = bid(&client, &base, None, auction_id, 100.0).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = bid(&client, &base, Some("not-a-token"), auction_id, 100.0).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let auction: Value = client
        .get(format!("{base}/auctions/{auction_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(auction["highest_bid"], 0.0);
    assert_eq!(auction["highest_bidder"], Value::Null);
    assert_eq!(auction["bids"], json!([]));
}

/// 회원 가입, 로그인, 로그아웃, 프로필 테스트
#[tokio::test]
async fn test_session_lifecycle() {
    let (base, _) = setup(SystemConfig::default()).await;
    let client = Client::new();
    let alice = register_and_login(&client, &base, "alice").await;

    // 중복 가입
    let response = client
        .post(format!("{base}/users"))
        .json(&json!({ "username": "alice", "password": "x", "email": "x@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 잘못된 비밀번호
    let response = client
        .post(format!("{base}/login"))
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let auction_id = create_test_auction(&client, &base, &alice, 0.0).await;
    let (status, _) = bid(&client, &base, Some(&alice), auction_id, 7.5).await;
    assert_eq!(status, StatusCode::OK);

    let profile: Value = client
        .get(format!("{base}/profile"))
        .header(SESSION_HEADER, &alice)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["username"], "alice");
    assert_eq!(
        profile["bids"],
        json!([{ "auction_title": "Vintage lamp", "amount": 7.5 }])
    );

    let text = client
        .get(format!("{base}/profile/text"))
        .header(SESSION_HEADER, &alice)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(text.contains("Auction: Vintage lamp, Amount: 7.5"));

    let response = client
        .post(format!("{base}/logout"))
        .header(SESSION_HEADER, &alice)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{base}/profile"))
        .header(SESSION_HEADER, &alice)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// 최소 입찰가 적용 모드 테스트
#[tokio::test]
async fn test_min_bid_enforced_when_configured() {
    let (base, _) = setup(SystemConfig {
        enforce_min_bid: true,
    })
    .await;
    let client = Client::new();
    let alice = register_and_login(&client, &base, "alice").await;
    let auction_id = create_test_auction(&client, &base, &alice, 10.0).await;

    let (status, body) = bid(&client, &base, Some(&alice), auction_id, 5.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BELOW_MIN_BID");

    let (status, _) = bid(&client, &base, Some(&alice), auction_id, 10.0).await;
    assert_eq!(status, StatusCode::OK);
}

/// 잘못된 입력 및 없는 경매 테스트
#[tokio::test]
async fn test_invalid_requests() {
    let (base, _) = setup(SystemConfig::default()).await;
    let client = Client::new();
    let alice = register_and_login(&client, &base, "alice").await;

    let (status, body) = bid(&client, &base, Some(&alice), 99, 1.0).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let auction_id = create_test_auction(&client, &base, &alice, 0.0).await;
    let (status, body) = bid(&client, &base, Some(&alice), auction_id, -1.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let response = client.get(format!("{base}/auctions/99")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// 형식이 잘못된 요청 본문과 경로 테스트
#[tokio::test]
async fn test_malformed_requests_use_error_format() {
    let (base, _) = setup(SystemConfig::default()).await;
    let client = Client::new();

    // 필수 필드 누락
    let response = client
        .post(format!("{base}/users"))
        .json(&json!({ "username": "a" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains("password"));

    // JSON 이 아닌 본문
    let response = client
        .post(format!("{base}/login"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_INPUT");

    // 숫자가 아닌 경매 ID
    for path in ["auctions/abc", "auctions/abc/bids"] {
        let response = client.get(format!("{base}/{path}")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], "INVALID_INPUT");
    }
}

/// 재로그인 시 이전 토큰은 더 이상 사용할 수 없다
#[tokio::test]
async fn test_relogin_revokes_previous_token() {
    let (base, _) = setup(SystemConfig::default()).await;
    let client = Client::new();
    let old_token = register_and_login(&client, &base, "alice").await;

    let session: Value = client
        .post(format!("{base}/login"))
        .json(&json!({ "username": "alice", "password": "pw" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let new_token = session["token"].as_str().unwrap();
    assert_ne!(new_token, old_token);

    let response = client
        .get(format!("{base}/profile"))
        .header(SESSION_HEADER, &old_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(format!("{base}/profile"))
        .header(SESSION_HEADER, new_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// 동시성 입찰 테스트
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bidding() {
    let (base, _) = setup(SystemConfig::default()).await;
    let client = Client::new();
    let seller = register_and_login(&client, &base, "seller").await;
    let auction_id = create_test_auction(&client, &base, &seller, 0.0).await;

    let mut tokens = Vec::new();
    for i in 1..=10 {
        tokens.push(register_and_login(&client, &base, &format!("bidder{i}")).await);
    }

    // 50개의 동시 입찰
    let mut handles = vec![];
    for i in 1..=50u32 {
        let client = client.clone();
        let base = base.clone();
        let token = tokens[(i as usize) % tokens.len()].clone();
        handles.push(tokio::spawn(async move {
            bid(&client, &base, Some(&token), auction_id, f64::from(i) * 1000.0).await
        }));
    }

    let mut successful_bids = 0;
    let mut failed_bids = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        if status == StatusCode::OK {
            successful_bids += 1;
        } else {
            assert_eq!(body["code"], "LOW_BID");
            failed_bids += 1;
        }
    }
    info!(
        "성공한 입찰 수: {}, 실패한 입찰 수: {}",
        successful_bids, failed_bids
    );

    let auction: Value = client
        .get(format!("{base}/auctions/{auction_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(auction["highest_bid"], 50_000.0);

    // 수락된 입찰만 이력에 있고, 이력은 엄격히 증가한다
    let bids = auction["bids"].as_array().unwrap();
    assert_eq!(bids.len(), successful_bids);
    let amounts: Vec<f64> = bids.iter().map(|b| b["amount"].as_f64().unwrap()).collect();
    assert!(amounts.windows(2).all(|w| w[0] < w[1]));
}

/// 동시 경매 생성 시 ID가 1부터 빈틈없이 부여되는지 확인
#[test]
fn test_concurrent_auction_ids_are_dense() {
    let system = AuctionSystem::default();
    system.register_user("seller", "pw", "s@example.com").unwrap();
    let session = system.login_user("seller", "pw").unwrap();

    let ids: Vec<u64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..25)
                        .map(|_| {
                            system
                                .create_auction(&session, "Item", "", 0.0, t0(), t0())
                                .unwrap()
                        })
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 200);
    assert_eq!(unique, (1..=200).collect::<HashSet<u64>>());
    assert_eq!(system.show_auctions().len(), 200);
}
