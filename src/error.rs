/// 경매 시스템 오류 정의
/// 모든 오류는 사용자 입력 또는 권한 조건이며, 프로세스를 중단시키지 않는다.
// region:    --- Imports
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
// endregion: --- Imports

// region:    --- Error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuctionError {
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Invalid credentials!")]
    InvalidCredentials,

    /// 인자는 거부된 동작 ("place a bid" 등)
    #[error("You must be logged in to {0}.")]
    Unauthorized(&'static str),

    #[error("Auction not found: {0}")]
    AuctionNotFound(u64),

    #[error("Auction not available: {0}")]
    AuctionNotAvailable(u64),

    #[error("Bid too low or invalid! (bid: {amount}, highest: {highest_bid})")]
    BidTooLow { amount: f64, highest_bid: f64 },

    #[error("Bid below minimum bid! (bid: {amount}, minimum: {min_bid})")]
    BelowMinimumBid { amount: f64, min_bid: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AuctionError {
    /// 응답 본문에 실리는 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuctionError::UserAlreadyExists(_) => "DUPLICATE_USER",
            AuctionError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuctionError::Unauthorized(_) => "UNAUTHORIZED",
            AuctionError::AuctionNotFound(_) => "NOT_FOUND",
            AuctionError::AuctionNotAvailable(_) => "NOT_AVAILABLE",
            AuctionError::BidTooLow { .. } => "LOW_BID",
            AuctionError::BelowMinimumBid { .. } => "BELOW_MIN_BID",
            AuctionError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuctionError::UserAlreadyExists(_) | AuctionError::AuctionNotAvailable(_) => {
                StatusCode::CONFLICT
            }
            AuctionError::InvalidCredentials | AuctionError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuctionError::AuctionNotFound(_) => StatusCode::NOT_FOUND,
            AuctionError::BidTooLow { .. }
            | AuctionError::BelowMinimumBid { .. }
            | AuctionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// 요청 본문/경로 파싱 실패는 모두 입력 오류로 응답한다
impl From<JsonRejection> for AuctionError {
    fn from(rejection: JsonRejection) -> Self {
        AuctionError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AuctionError {
    fn from(rejection: PathRejection) -> Self {
        AuctionError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        }));
        (self.status(), body).into_response()
    }
}

pub type AuctionResult<T> = Result<T, AuctionError>;
// endregion: --- Error

// endregion: --- Tests
