/// 경매 상품
/// 최고 입찰가는 현재 최고가보다 엄격히 높은 입찰로만 갱신된다.
// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
// endregion: --- Imports

// region:    --- Model
/// 수락된 입찰 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidEntry {
    pub amount: f64,
    pub bidder: String,
}

/// 시계로부터 계산되는 경매 상태. 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Pending,
    Active,
    Expired,
}

#[derive(Debug, Clone)]
pub struct AuctionItem {
    title: String,
    description: String,
    min_bid: f64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    highest_bid: f64,
    highest_bidder: Option<String>,
    bids: Vec<BidEntry>,
}

impl AuctionItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        min_bid: f64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            min_bid,
            start_time,
            end_time,
            highest_bid: 0.0,
            highest_bidder: None,
            bids: Vec::new(),
        }
    }

    /// 입찰 추가. 현재 최고가보다 높을 때만 수락하고, 거절 시 상태는 그대로다.
    pub fn add_bid(&mut self, amount: f64, bidder: &str) -> bool {
        if amount > self.highest_bid {
            self.highest_bid = amount;
            self.highest_bidder = Some(bidder.to_string());
            self.bids.push(BidEntry {
                amount,
                bidder: bidder.to_string(),
            });
            return true;
        }
        false
    }

    /// [start_time, end_time] 닫힌 구간
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time
    }

    /// 종료 시각이 지났는지만 알려준다. 상태를 바꾸지 않는다.
    pub fn close_auction(&self, now: DateTime<Utc>) -> bool {
        now > self.end_time
    }

    pub fn status(&self, now: DateTime<Utc>) -> AuctionStatus {
        if now < self.start_time {
            AuctionStatus::Pending
        } else if now <= self.end_time {
            AuctionStatus::Active
        } else {
            AuctionStatus::Expired
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn min_bid(&self) -> f64 {
        self.min_bid
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn highest_bid(&self) -> f64 {
        self.highest_bid
    }

    pub fn highest_bidder(&self) -> Option<&str> {
        self.highest_bidder.as_deref()
    }

    pub fn bids(&self) -> &[BidEntry] {
        &self.bids
    }
}
// endregion: --- Model

// endregion: --- Tests
