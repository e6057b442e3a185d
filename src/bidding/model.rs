use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 수락 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidReceipt {
    pub auction_id: u64,
    pub bidder: String,
    pub bid_amount: f64,
    pub current_price: f64,
    pub bid_time: DateTime<Utc>,
}
