pub mod auction;
pub mod bidding;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod system;
pub mod user;
