// region:    --- Imports
use super::views::{AuctionListing, AuctionView, UserProfile};
use crate::auction::BidEntry;
use crate::error::{AuctionError, AuctionResult};
use crate::system::{AuctionSystem, Session};
use tracing::debug;

// endregion: --- Imports

// region:    --- Query Handlers
impl AuctionSystem {
    /// 모든 경매 조회
    pub fn show_auctions(&self) -> AuctionListing {
        debug!("{:<12} --> 모든 경매 조회", "Query");
        let now = self.clock.now();
        let auctions = self.auctions.read();
        let views = auctions
            .iter()
            .map(|(id, auction)| AuctionView::from_item(*id, &auction.lock(), now))
            .collect();
        AuctionListing(views)
    }

    /// 경매 조회
    pub fn get_auction(&self, auction_id: u64) -> AuctionResult<AuctionView> {
        debug!("{:<12} --> 경매 조회 id: {}", "Query", auction_id);
        let now = self.clock.now();
        let auctions = self.auctions.read();
        let auction = auctions
            .get(&auction_id)
            .ok_or(AuctionError::AuctionNotFound(auction_id))?;
        let view = AuctionView::from_item(auction_id, &auction.lock(), now);
        Ok(view)
    }

    /// 입찰 이력 조회 (수락 순서)
    pub fn get_bid_history(&self, auction_id: u64) -> AuctionResult<Vec<BidEntry>> {
        debug!("{:<12} --> 입찰 이력 조회 id: {}", "Query", auction_id);
        let auctions = self.auctions.read();
        let auction = auctions
            .get(&auction_id)
            .ok_or(AuctionError::AuctionNotFound(auction_id))?;
        let bids = auction.lock().bids().to_vec();
        Ok(bids)
    }

    /// 로그인한 사용자 프로필 조회
    pub fn show_user_profile(&self, session: &Session) -> AuctionResult<UserProfile> {
        let username = self.authorize(session, "view the profile")?;
        debug!("{:<12} --> 프로필 조회: {}", "Query", username);
        self.users
            .read()
            .get(&username)
            .map(UserProfile::from)
            .ok_or(AuctionError::Unauthorized("view the profile"))
    }
}
// endregion: --- Query Handlers

// endregion: --- Tests
