use tracing::debug;

use crate::model::Deal;

/// The seller a seller-info popup is about, copied out of a deal.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerProfile {
    pub name: String,
    pub rating: f32,
    pub deal_count: u32,
    pub company: String,
}

impl From<&Deal> for SellerProfile {
    fn from(deal: &Deal) -> Self {
        Self {
            name: deal.seller.clone(),
            rating: deal.seller_rating,
            deal_count: deal.seller_deals,
            company: deal.company.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Sell,
    Buy,
    Seller,
    Message,
}

/// Which overlay is showing. Only one can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    SellForm,
    BuyForm,
    SellerInfo(SellerProfile),
    MessageCompose(Deal),
}

impl ModalState {
    pub fn kind(&self) -> Option<ModalKind> {
        match self {
            ModalState::Closed => None,
            ModalState::SellForm => Some(ModalKind::Sell),
            ModalState::BuyForm => Some(ModalKind::Buy),
            ModalState::SellerInfo(_) => Some(ModalKind::Seller),
            ModalState::MessageCompose(_) => Some(ModalKind::Message),
        }
    }
}

/// Tracks the open modal. Opening replaces whatever was open before
/// (last writer wins); closing a modal that is not open does nothing.
#[derive(Debug, Clone, Default)]
pub struct ModalCoordinator {
    state: ModalState,
}

impl ModalCoordinator {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.state.kind() == Some(kind)
    }

    pub fn any_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn selected_seller(&self) -> Option<&SellerProfile> {
        match &self.state {
            ModalState::SellerInfo(seller) => Some(seller),
            _ => None,
        }
    }

    pub fn selected_deal(&self) -> Option<&Deal> {
        match &self.state {
            ModalState::MessageCompose(deal) => Some(deal),
            _ => None,
        }
    }

    fn open(&mut self, next: ModalState) {
        if let Some(previous) = self.state.kind() {
            debug!(?previous, next = ?next.kind(), "replacing open modal");
        }
        self.state = next;
    }

    pub fn open_sell(&mut self) {
        self.open(ModalState::SellForm);
    }

    pub fn open_buy(&mut self) {
        self.open(ModalState::BuyForm);
    }

    pub fn open_seller(&mut self, seller: SellerProfile) {
        self.open(ModalState::SellerInfo(seller));
    }

    pub fn open_message(&mut self, deal: Deal) {
        self.open(ModalState::MessageCompose(deal));
    }

    /// Closes `kind` if it is the open modal. Returns whether anything closed.
    pub fn close(&mut self, kind: ModalKind) -> bool {
        if self.is_open(kind) {
            self.state = ModalState::Closed;
            true
        } else {
            false
        }
    }

    pub fn close_sell(&mut self) -> bool {
        self.close(ModalKind::Sell)
    }

    pub fn close_buy(&mut self) -> bool {
        self.close(ModalKind::Buy)
    }

    pub fn close_seller(&mut self) -> bool {
        self.close(ModalKind::Seller)
    }

    pub fn close_message(&mut self) -> bool {
        self.close(ModalKind::Message)
    }

    pub fn close_all(&mut self) -> bool {
        let was_open = self.any_open();
        self.state = ModalState::Closed;
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::mock_deals;
    use chrono::NaiveDate;

    fn deal() -> Deal {
        mock_deals("고려해운", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).remove(0)
    }

    #[test]
    fn opening_replaces_previous_modal() {
        let mut modals = ModalCoordinator::default();
        modals.open_sell();
        modals.open_message(deal());
        assert!(modals.is_open(ModalKind::Message));
        assert!(!modals.is_open(ModalKind::Sell));
        assert_eq!(modals.selected_deal().map(|d| d.id), Some(1));
    }

    #[test]
    fn closing_clears_selected_entity() {
        let mut modals = ModalCoordinator::default();
        let d = deal();
        modals.open_seller(SellerProfile::from(&d));
        assert_eq!(modals.selected_seller().map(|s| s.name.as_str()), Some("익명거래자1"));
        assert!(modals.close_seller());
        assert!(modals.selected_seller().is_none());
        assert_eq!(modals.state(), &ModalState::Closed);
    }

    #[test]
    fn closing_a_modal_that_is_not_open_is_a_no_op() {
        let mut modals = ModalCoordinator::default();
        assert!(!modals.close_buy());

        modals.open_message(deal());
        assert!(!modals.close_sell());
        assert!(!modals.close_seller());
        assert!(modals.is_open(ModalKind::Message));
        assert!(modals.selected_deal().is_some());

        assert!(modals.close_all());
        assert!(!modals.close_all());
    }
}
