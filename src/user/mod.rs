/// 사용자
/// 입찰은 경매 상품에 위임하고, 수락된 입찰만 자신의 이력에 남긴다.
// region:    --- Imports
use crate::auction::AuctionItem;
use serde::{Deserialize, Serialize};
// endregion: --- Imports

// region:    --- Model
/// 사용자가 남긴 입찰 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    pub auction_title: String,
    pub amount: f64,
}

#[derive(Debug, Clone)]
pub struct User {
    username: String,
    password: String,
    email: String,
    bids: Vec<BidRecord>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            bids: Vec::new(),
        }
    }

    /// 경매 활성 여부는 확인하지 않는다. 호출자(AuctionSystem)의 책임.
    pub fn place_bid(&mut self, auction: &mut AuctionItem, amount: f64) -> bool {
        if auction.add_bid(amount, &self.username) {
            self.bids.push(BidRecord {
                auction_title: auction.title().to_string(),
                amount,
            });
            return true;
        }
        false
    }

    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn bids(&self) -> &[BidRecord] {
        &self.bids
    }
}
// endregion: --- Model

// endregion: --- Tests
