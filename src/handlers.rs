// region:    --- Imports
use crate::bidding::commands::{
    CreateAuctionCommand, LoginCommand, PlaceBidCommand, RegisterUserCommand,
};
use crate::error::{AuctionError, AuctionResult};
use crate::system::{AuctionSystem, Session};
use axum::extract::{DefaultBodyLimit, FromRequest, FromRequestParts, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

/// 세션 토큰 헤더
pub const SESSION_HEADER: &str = "x-session-token";

// region:    --- Extractors
/// 파싱 실패를 AuctionError 형식으로 돌려주는 Json 추출기
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AuctionError))]
pub struct AppJson<T>(pub T);

/// 파싱 실패를 AuctionError 형식으로 돌려주는 Path 추출기
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AuctionError))]
pub struct AppPath<T>(pub T);
// endregion: --- Extractors

// region:    --- Router
pub fn routes(system: Arc<AuctionSystem>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", post(handle_register))
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/auctions", post(handle_create_auction).get(handle_get_auctions))
        .route("/auctions/listing", get(handle_get_auction_listing))
        .route("/auctions/:id", get(handle_get_auction))
        .route("/auctions/:id/bids", get(handle_get_bid_history))
        .route("/bid", post(handle_bid))
        .route("/profile", get(handle_get_profile))
        .route("/profile/text", get(handle_get_profile_text))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(system)
}

/// 헤더의 토큰으로 세션 복원
fn session_from_headers(
    system: &AuctionSystem,
    headers: &HeaderMap,
    action: &'static str,
) -> AuctionResult<Session> {
    let token = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or(AuctionError::Unauthorized(action))?;
    system.session(token, action)
}
// endregion: --- Router

// region:    --- Command Handlers

/// 회원 가입
pub async fn handle_register(
    State(system): State<Arc<AuctionSystem>>,
    AppJson(cmd): AppJson<RegisterUserCommand>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> 회원 가입 요청: {}", "Handler", cmd.username);
    system.register_user(&cmd.username, &cmd.password, &cmd.email)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully!",
            "username": cmd.username,
        })),
    ))
}

/// 로그인
pub async fn handle_login(
    State(system): State<Arc<AuctionSystem>>,
    AppJson(cmd): AppJson<LoginCommand>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> 로그인 요청: {}", "Handler", cmd.username);
    let session = system.login_user(&cmd.username, &cmd.password)?;
    Ok(Json(session))
}

/// 로그아웃
pub async fn handle_logout(
    State(system): State<Arc<AuctionSystem>>,
    headers: HeaderMap,
) -> AuctionResult<impl IntoResponse> {
    let session = session_from_headers(&system, &headers, "log out")?;
    system.logout(&session)?;
    Ok(StatusCode::NO_CONTENT)
}

/// 경매 생성
pub async fn handle_create_auction(
    State(system): State<Arc<AuctionSystem>>,
    headers: HeaderMap,
    AppJson(cmd): AppJson<CreateAuctionCommand>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> 경매 생성 요청: {:?}", "Handler", cmd);
    let session = session_from_headers(&system, &headers, "create an auction")?;
    cmd.validate()?;
    let auction_id = system.create_auction(
        &session,
        &cmd.title,
        &cmd.description,
        cmd.min_bid,
        cmd.start_time,
        cmd.end_time,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": format!("Auction created successfully with ID {auction_id}!"),
            "auction_id": auction_id,
        })),
    ))
}

/// 입찰 요청 처리
pub async fn handle_bid(
    State(system): State<Arc<AuctionSystem>>,
    headers: HeaderMap,
    AppJson(cmd): AppJson<PlaceBidCommand>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> 입찰 요청: {:?}", "Handler", cmd);
    let session = session_from_headers(&system, &headers, "place a bid")?;
    cmd.validate()?;
    let receipt = system.place_bid(&session, cmd.auction_id, cmd.bid_amount)?;
    Ok(Json(serde_json::json!({
        "message": format!(
            "Bid placed successfully! Current highest bid: {:?}",
            receipt.current_price
        ),
        "receipt": receipt,
    })))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 경매 조회
pub async fn handle_get_auctions(State(system): State<Arc<AuctionSystem>>) -> impl IntoResponse {
    Json(system.show_auctions())
}

/// 모든 경매 텍스트 목록
pub async fn handle_get_auction_listing(
    State(system): State<Arc<AuctionSystem>>,
) -> impl IntoResponse {
    system.show_auctions().to_string()
}

/// 경매 조회
pub async fn handle_get_auction(
    State(system): State<Arc<AuctionSystem>>,
    AppPath(auction_id): AppPath<u64>,
) -> AuctionResult<impl IntoResponse> {
    Ok(Json(system.get_auction(auction_id)?))
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(system): State<Arc<AuctionSystem>>,
    AppPath(auction_id): AppPath<u64>,
) -> AuctionResult<impl IntoResponse> {
    Ok(Json(system.get_bid_history(auction_id)?))
}

/// 프로필 조회
pub async fn handle_get_profile(
    State(system): State<Arc<AuctionSystem>>,
    headers: HeaderMap,
) -> AuctionResult<impl IntoResponse> {
    let session = session_from_headers(&system, &headers, "view the profile")?;
    Ok(Json(system.show_user_profile(&session)?))
}

/// 프로필 텍스트
pub async fn handle_get_profile_text(
    State(system): State<Arc<AuctionSystem>>,
    headers: HeaderMap,
) -> AuctionResult<impl IntoResponse> {
    let session = session_from_headers(&system, &headers, "view the profile")?;
    Ok(system.show_user_profile(&session)?.to_string())
}

// endregion: --- Query Handlers
