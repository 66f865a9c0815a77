//! The deal board's state container.
//!
//! `MainStore` owns the loaded deals, the filter/pagination state and the
//! modal coordinator. Derived views (`filtered`, `page`) are recomputed on
//! every call. Listeners registered with [`MainStore::subscribe`] hear about
//! each mutation until they unsubscribe or the store is disposed.

use tracing::debug;

use crate::model::{Deal, ItemsPerPage, StatusFilter, TypeFilter};
use crate::query::{self, Page};
use crate::state::filter::FilterState;
use crate::state::modal::{ModalCoordinator, ModalKind, SellerProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Deals,
    Loading,
    Filter,
    Page,
    Modal,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange) + Send>;

pub struct MainStore {
    deals: Vec<Deal>,
    deals_loaded: bool,
    is_loading: bool,
    filter: FilterState,
    modals: ModalCoordinator,
    user_nickname: String,
    user_company: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    disposed: bool,
}

impl Default for MainStore {
    fn default() -> Self {
        Self::new(ItemsPerPage::default())
    }
}

impl MainStore {
    pub fn new(items_per_page: ItemsPerPage) -> Self {
        Self {
            deals: Vec::new(),
            deals_loaded: false,
            is_loading: true,
            filter: FilterState::new(items_per_page),
            modals: ModalCoordinator::default(),
            user_nickname: String::new(),
            user_company: String::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            disposed: false,
        }
    }

    // --- lifecycle ---

    pub fn subscribe(&mut self, listener: impl FnMut(&StoreChange) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        if self.disposed {
            debug!(?id, "store disposed, listener not registered");
        } else {
            self.listeners.push((id, Box::new(listener)));
        }
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        before != self.listeners.len()
    }

    /// Drops every listener. The store keeps working but no longer notifies.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, change: StoreChange) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }

    // --- deals ---

    /// Populates the board. Only the first load is accepted.
    pub fn load_deals(&mut self, deals: Vec<Deal>) -> bool {
        if self.deals_loaded {
            debug!("deals already loaded, ignoring reload");
            return false;
        }
        debug!(count = deals.len(), "deals loaded");
        self.deals = deals;
        self.deals_loaded = true;
        self.is_loading = false;
        self.notify(StoreChange::Deals);
        true
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn deals_loaded(&self) -> bool {
        self.deals_loaded
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.notify(StoreChange::Loading);
    }

    // --- filters ---

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.filter.set_status_filter(filter);
        self.notify(StoreChange::Filter);
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.filter.set_type_filter(filter);
        self.notify(StoreChange::Filter);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.set_search_term(term);
        self.notify(StoreChange::Filter);
    }

    pub fn set_items_per_page(&mut self, items: ItemsPerPage) {
        self.filter.set_items_per_page(items);
        self.notify(StoreChange::Filter);
    }

    pub fn set_status_filter_str(&mut self, raw: &str) -> bool {
        let applied = self.filter.set_status_filter_str(raw);
        if applied {
            self.notify(StoreChange::Filter);
        }
        applied
    }

    pub fn set_type_filter_str(&mut self, raw: &str) -> bool {
        let applied = self.filter.set_type_filter_str(raw);
        if applied {
            self.notify(StoreChange::Filter);
        }
        applied
    }

    pub fn set_items_per_page_value(&mut self, raw: usize) -> bool {
        let applied = self.filter.set_items_per_page_value(raw);
        if applied {
            self.notify(StoreChange::Filter);
        }
        applied
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.notify(StoreChange::Filter);
    }

    /// Moves to `page` if it exists for the current filtered results.
    pub fn set_current_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        let applied = self.filter.set_current_page(page, total);
        if applied {
            self.notify(StoreChange::Page);
        }
        applied
    }

    pub fn next_page(&mut self) -> bool {
        self.set_current_page(self.filter.current_page() + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.filter.current_page().checked_sub(1) {
            Some(page) => self.set_current_page(page),
            None => false,
        }
    }

    // --- derived ---

    pub fn filtered(&self) -> Vec<&Deal> {
        query::filter_deals(
            &self.deals,
            self.filter.status_filter(),
            self.filter.type_filter(),
            self.filter.search_term(),
        )
    }

    pub fn total_pages(&self) -> usize {
        query::total_pages(self.filtered().len(), self.filter.items_per_page().get())
    }

    pub fn page(&self) -> Page<Deal> {
        let filtered: Vec<Deal> = self.filtered().into_iter().cloned().collect();
        query::paginate(&filtered, self.filter.current_page(), self.filter.items_per_page().get())
    }

    pub fn popular(&self, limit: usize) -> Vec<&Deal> {
        query::top_by_views(&self.deals, limit)
    }

    // --- modals ---

    pub fn modals(&self) -> &ModalCoordinator {
        &self.modals
    }

    pub fn open_sell(&mut self) {
        self.modals.open_sell();
        self.notify(StoreChange::Modal);
    }

    pub fn open_buy(&mut self) {
        self.modals.open_buy();
        self.notify(StoreChange::Modal);
    }

    pub fn open_seller(&mut self, seller: SellerProfile) {
        self.modals.open_seller(seller);
        self.notify(StoreChange::Modal);
    }

    pub fn open_message(&mut self, deal: Deal) {
        self.modals.open_message(deal);
        self.notify(StoreChange::Modal);
    }

    pub fn close_modal(&mut self, kind: ModalKind) -> bool {
        let closed = self.modals.close(kind);
        if closed {
            self.notify(StoreChange::Modal);
        }
        closed
    }

    pub fn close_all_modals(&mut self) -> bool {
        let closed = self.modals.close_all();
        if closed {
            self.notify(StoreChange::Modal);
        }
        closed
    }

    // --- user ---

    pub fn user_nickname(&self) -> &str {
        &self.user_nickname
    }

    pub fn user_company(&self) -> &str {
        &self.user_company
    }

    pub fn set_user(&mut self, nickname: impl Into<String>, company: impl Into<String>) {
        self.user_nickname = nickname.into();
        self.user_company = company.into();
        self.notify(StoreChange::User);
    }

    pub fn clear_user(&mut self) {
        self.user_nickname.clear();
        self.user_company.clear();
        self.modals.close_all();
        self.notify(StoreChange::User);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::mock_deals;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    fn loaded_store(per_page: ItemsPerPage) -> MainStore {
        let mut store = MainStore::new(per_page);
        store.load_deals(mock_deals("고려해운", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        store
    }

    fn recorder(store: &mut MainStore) -> (SubscriptionId, Arc<Mutex<Vec<StoreChange>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |change| sink.lock().unwrap().push(*change));
        (id, seen)
    }

    #[test]
    fn deals_load_once() {
        let mut store = MainStore::default();
        assert!(store.is_loading());
        assert!(store.load_deals(Vec::new()));
        assert!(!store.is_loading());
        assert!(!store.load_deals(mock_deals("x", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())));
        assert!(store.deals().is_empty());
    }

    #[test]
    fn page_follows_filters() {
        let mut store = loaded_store(ItemsPerPage::Five);
        assert_eq!(store.total_pages(), 3);
        assert!(store.set_current_page(3));
        assert_eq!(store.page().items.len(), 2);

        store.set_type_filter(TypeFilter::Buy);
        assert_eq!(store.filter().current_page(), 1);
        let page = store.page();
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_pagination());
        assert_eq!(page.items.iter().map(|d| d.id).collect::<Vec<_>>(), vec![4, 5, 7, 9, 11]);
    }

    #[test]
    fn current_page_is_validated_against_filtered_results() {
        let mut store = loaded_store(ItemsPerPage::Ten);
        assert!(store.set_current_page(2));
        assert!(!store.set_current_page(3));
        assert!(!store.next_page());
        assert!(store.prev_page());
        assert!(!store.prev_page());

        store.set_search_term("존재하지 않는 거래");
        assert_eq!(store.total_pages(), 0);
        assert!(!store.set_current_page(1));
        assert!(store.page().is_empty());
    }

    #[test]
    fn listeners_hear_mutations_until_unsubscribed() {
        let mut store = loaded_store(ItemsPerPage::Ten);
        let (id, seen) = recorder(&mut store);

        store.set_search_term("50만");
        store.open_sell();
        assert!(!store.close_modal(ModalKind::Buy));
        assert!(store.close_modal(ModalKind::Sell));
        assert!(!store.set_status_filter_str("archived"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![StoreChange::Filter, StoreChange::Modal, StoreChange::Modal]
        );

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_search_term("");
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn dispose_drops_listeners() {
        let mut store = MainStore::default();
        let (_, seen) = recorder(&mut store);
        store.dispose();
        assert_eq!(store.listener_count(), 0);

        let (_, late) = recorder(&mut store);
        store.set_user("tester", "고려해운");
        assert!(seen.lock().unwrap().is_empty());
        assert!(late.lock().unwrap().is_empty());
        assert_eq!(store.user_nickname(), "tester");
    }

    #[test]
    fn popular_deals_use_the_whole_board() {
        let mut store = loaded_store(ItemsPerPage::Ten);
        store.set_status_filter(StatusFilter::Completed);
        let ids: Vec<_> = store.popular(3).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 10, 6]);
    }
}
