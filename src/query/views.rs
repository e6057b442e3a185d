/// 조회 결과 모델과 텍스트 출력
// region:    --- Imports
use crate::auction::{AuctionItem, AuctionStatus, BidEntry};
use crate::user::{BidRecord, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
// endregion: --- Imports

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// region:    --- Auction Views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub min_bid: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub highest_bid: f64,
    pub highest_bidder: Option<String>,
    pub status: AuctionStatus,
    pub bids: Vec<BidEntry>,
}

impl AuctionView {
    pub fn from_item(id: u64, item: &AuctionItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: item.title().to_string(),
            description: item.description().to_string(),
            min_bid: item.min_bid(),
            start_time: item.start_time(),
            end_time: item.end_time(),
            highest_bid: item.highest_bid(),
            highest_bidder: item.highest_bidder().map(str::to_string),
            status: item.status(now),
            bids: item.bids().to_vec(),
        }
    }

    /// 목록에 표시되는 상태. 활성 구간 밖이면 모두 Closed.
    pub fn status_label(&self) -> &'static str {
        match self.status {
            AuctionStatus::Active => "Active",
            AuctionStatus::Pending | AuctionStatus::Expired => "Closed",
        }
    }
}

impl fmt::Display for AuctionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        // 금액은 항상 소수점을 붙여 출력 (10 -> 10.0)
        writeln!(f, "Minimum Bid: {:?}", self.min_bid)?;
        writeln!(f, "Start Time: {}", self.start_time.format(TIME_FORMAT))?;
        writeln!(f, "End Time: {}", self.end_time.format(TIME_FORMAT))?;
        writeln!(f, "Highest Bid: {:?}", self.highest_bid)?;
        writeln!(
            f,
            "Highest Bidder: {}",
            self.highest_bidder.as_deref().unwrap_or("None")
        )?;
        writeln!(f, "Status: {}", self.status_label())?;
        writeln!(f, "Bids:")?;
        for bid in &self.bids {
            writeln!(f, "  {} bid {:?}", bid.bidder, bid.amount)?;
        }
        Ok(())
    }
}

/// 전체 경매 목록 (ID 오름차순)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuctionListing(pub Vec<AuctionView>);

impl AuctionListing {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuctionView> {
        self.0.iter()
    }
}

impl fmt::Display for AuctionListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No auctions available.");
        }
        for view in &self.0 {
            writeln!(f, "{view}")?;
        }
        Ok(())
    }
}
// endregion: --- Auction Views

// region:    --- User Views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub bids: Vec<BidRecord>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            email: user.email().to_string(),
            bids: user.bids().to_vec(),
        }
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Username: {}", self.username)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Bids Made:")?;
        for bid in &self.bids {
            writeln!(f, "  Auction: {}, Amount: {:?}", bid.auction_title, bid.amount)?;
        }
        Ok(())
    }
}
// endregion: --- User Views

// endregion: --- Tests
