/// 경매 관련 커맨드 처리
/// 1. 경매 생성
/// 2. 입찰
// region:    --- Imports
use super::model::BidReceipt;
use crate::auction::AuctionItem;
use crate::error::{AuctionError, AuctionResult};
use crate::system::{AuctionSystem, Session};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 회원 가입 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// 로그인 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// 경매 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateAuctionCommand {
    pub title: String,
    pub description: String,
    pub min_bid: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub auction_id: u64,
    pub bid_amount: f64,
}

impl CreateAuctionCommand {
    /// 숫자 형식만 확인한다. 시간 순서나 음수 최소가는 허용된다.
    pub fn validate(&self) -> AuctionResult<()> {
        if !self.min_bid.is_finite() {
            return Err(AuctionError::InvalidInput(format!(
                "min_bid must be a number, got {}",
                self.min_bid
            )));
        }
        Ok(())
    }
}

impl PlaceBidCommand {
    pub fn validate(&self) -> AuctionResult<()> {
        if !self.bid_amount.is_finite() || self.bid_amount < 0.0 {
            return Err(AuctionError::InvalidInput(format!(
                "bid_amount must be a non-negative number, got {}",
                self.bid_amount
            )));
        }
        Ok(())
    }
}
// endregion: --- Commands

// region:    --- Command Handlers
impl AuctionSystem {
    /// 1. 경매 생성
    /// ID는 생성 순서대로 1부터 부여된다.
    pub fn create_auction(
        &self,
        session: &Session,
        title: &str,
        description: &str,
        min_bid: f64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AuctionResult<u64> {
        self.authorize(session, "create an auction")?;

        let item = AuctionItem::new(title, description, min_bid, start_time, end_time);
        let mut auctions = self.auctions.write();
        let auction_id = auctions.len() as u64 + 1;
        auctions.insert(auction_id, Arc::new(Mutex::new(item)));

        info!(
            "{:<12} --> 경매 생성 완료 id: {}, 판매자: {}",
            "Command", auction_id, session.username
        );
        Ok(auction_id)
    }

    /// 2. 입찰
    /// 세션 -> 경매 존재 -> 활성 구간 -> (최소 입찰가) 순서로 검증한 뒤 사용자에게 위임한다.
    /// 검증부터 기록까지 해당 경매의 잠금 안에서 처리된다.
    pub fn place_bid(
        &self,
        session: &Session,
        auction_id: u64,
        amount: f64,
    ) -> AuctionResult<BidReceipt> {
        info!(
            "{:<12} --> 입찰 요청 처리 시작: id: {}, 금액: {}",
            "Command", auction_id, amount
        );
        let username = self.authorize(session, "place a bid")?;

        let auction = self
            .auctions
            .read()
            .get(&auction_id)
            .cloned()
            .ok_or(AuctionError::AuctionNotFound(auction_id))?;
        let mut item = auction.lock();

        let now = self.clock.now();
        if !item.is_active(now) {
            warn!(
                "{:<12} --> 진행 중이 아닌 경매: id: {}, 상태: {:?}",
                "Command",
                auction_id,
                item.status(now)
            );
            return Err(AuctionError::AuctionNotAvailable(auction_id));
        }

        if self.config.enforce_min_bid && amount < item.min_bid() {
            warn!(
                "{:<12} --> 최소 입찰가 미달: {} < {}",
                "Command",
                amount,
                item.min_bid()
            );
            return Err(AuctionError::BelowMinimumBid {
                amount,
                min_bid: item.min_bid(),
            });
        }

        let mut users = self.users.write();
        let user = users
            .get_mut(&username)
            .ok_or(AuctionError::Unauthorized("place a bid"))?;

        if !user.place_bid(&mut item, amount) {
            warn!(
                "{:<12} --> 입찰 실패: 현재 가격이 더 높거나 같음 ({})",
                "Command",
                item.highest_bid()
            );
            return Err(AuctionError::BidTooLow {
                amount,
                highest_bid: item.highest_bid(),
            });
        }

        info!(
            "{:<12} --> 입찰 성공: 현재 가격 {}",
            "Command",
            item.highest_bid()
        );
        Ok(BidReceipt {
            auction_id,
            bidder: username,
            bid_amount: amount,
            current_price: item.highest_bid(),
            bid_time: now,
        })
    }
}
// endregion: --- Command Handlers

// endregion: --- Tests
