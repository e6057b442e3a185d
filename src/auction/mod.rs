pub mod item;

pub use item::{AuctionItem, AuctionStatus, BidEntry};
