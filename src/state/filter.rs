use tracing::debug;

use crate::model::{ItemsPerPage, StatusFilter, TypeFilter};

/// Filter, search and pagination parameters for the deal board.
///
/// Any change to status, type, search or page size puts the board back on
/// page 1, even when the new value equals the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    status_filter: StatusFilter,
    type_filter: TypeFilter,
    search_term: String,
    current_page: usize,
    items_per_page: ItemsPerPage,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(ItemsPerPage::default())
    }
}

impl FilterState {
    pub fn new(items_per_page: ItemsPerPage) -> Self {
        Self {
            status_filter: StatusFilter::All,
            type_filter: TypeFilter::All,
            search_term: String::new(),
            current_page: 1,
            items_per_page,
        }
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> ItemsPerPage {
        self.items_per_page
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.current_page = 1;
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.type_filter = filter;
        self.current_page = 1;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn set_items_per_page(&mut self, items: ItemsPerPage) {
        self.items_per_page = items;
        self.current_page = 1;
    }

    /// Applies a raw status value; anything outside the domain is ignored.
    pub fn set_status_filter_str(&mut self, raw: &str) -> bool {
        match raw.parse() {
            Ok(filter) => {
                self.set_status_filter(filter);
                true
            }
            Err(e) => {
                debug!(error = %e, "ignoring status filter");
                false
            }
        }
    }

    pub fn set_type_filter_str(&mut self, raw: &str) -> bool {
        match raw.parse() {
            Ok(filter) => {
                self.set_type_filter(filter);
                true
            }
            Err(e) => {
                debug!(error = %e, "ignoring type filter");
                false
            }
        }
    }

    pub fn set_items_per_page_value(&mut self, raw: usize) -> bool {
        match ItemsPerPage::try_from(raw) {
            Ok(items) => {
                self.set_items_per_page(items);
                true
            }
            Err(e) => {
                debug!(error = %e, "ignoring page size");
                false
            }
        }
    }

    /// Moves to `page` if it lies within `1..=total_pages`; otherwise
    /// leaves the current page untouched and returns `false`.
    pub fn set_current_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page == 0 || page > total_pages {
            debug!(page, total_pages, "rejecting out-of-range page");
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.items_per_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> FilterState {
        let mut state = FilterState::default();
        assert!(state.set_current_page(3, 5));
        state
    }

    #[test]
    fn every_filter_change_resets_to_first_page() {
        let mut state = on_page_three();
        state.set_status_filter(StatusFilter::Selling);
        assert_eq!(state.current_page(), 1);

        let mut state = on_page_three();
        state.set_type_filter(TypeFilter::Buy);
        assert_eq!(state.current_page(), 1);

        let mut state = on_page_three();
        state.set_search_term("50만");
        assert_eq!(state.current_page(), 1);

        let mut state = on_page_three();
        state.set_items_per_page(ItemsPerPage::Twenty);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn reapplying_the_same_value_still_resets_and_is_idempotent() {
        let mut state = on_page_three();
        state.set_status_filter(StatusFilter::All);
        assert_eq!(state.current_page(), 1);

        let mut once = FilterState::default();
        once.set_status_filter(StatusFilter::Completed);
        let mut twice = once.clone();
        twice.set_status_filter(StatusFilter::Completed);
        assert_eq!(once, twice);
    }

    #[test]
    fn invalid_raw_values_are_ignored() {
        let mut state = on_page_three();
        assert!(!state.set_status_filter_str("archived"));
        assert!(!state.set_type_filter_str("trade"));
        assert!(!state.set_items_per_page_value(7));
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.status_filter(), StatusFilter::All);
        assert_eq!(state.items_per_page(), ItemsPerPage::Ten);

        assert!(state.set_items_per_page_value(50));
        assert_eq!(state.items_per_page(), ItemsPerPage::Fifty);
        assert_eq!(state.current_page(), 1);
        assert!(state.set_type_filter_str("sell"));
        assert_eq!(state.type_filter(), TypeFilter::Sell);
    }

    #[test]
    fn out_of_range_page_is_rejected() {
        let mut state = FilterState::default();
        assert!(!state.set_current_page(0, 3));
        assert!(!state.set_current_page(4, 3));
        assert!(!state.set_current_page(1, 0));
        assert_eq!(state.current_page(), 1);
        assert!(state.set_current_page(3, 3));
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn reset_keeps_page_size() {
        let mut state = FilterState::new(ItemsPerPage::Five);
        state.set_search_term("x");
        state.set_status_filter(StatusFilter::Completed);
        state.reset();
        assert_eq!(state, FilterState::new(ItemsPerPage::Five));
    }
}
