pub mod handlers;
pub mod views;

pub use views::{AuctionListing, AuctionView, UserProfile};
