use std::sync::{Arc, Mutex};

use black_market::mock_data::mock_deals;
use black_market::model::{Deal, DealStatus, DealType, ItemsPerPage, StatusFilter, TypeFilter};
use black_market::query::{filter_deals, paginate, total_pages};
use black_market::store::{MainStore, StoreChange};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn deal(id: u32, deal_type: DealType) -> Deal {
    Deal {
        id,
        title: format!("포인트 {id}0만점"),
        seller: format!("trader{id}"),
        points: u64::from(id) * 100_000,
        price: u64::from(id) * 90_000,
        status: DealStatus::Selling,
        deal_type,
        views: u64::from(id),
        seller_rating: 4.5,
        seller_deals: id,
        company: "고려해운".to_string(),
        expires_at: today(),
    }
}

/// Twelve deals, three of them buy orders.
fn twelve_deals() -> Vec<Deal> {
    (1..=12)
        .map(|id| {
            let kind = if matches!(id, 2 | 7 | 11) { DealType::Buy } else { DealType::Sell };
            deal(id, kind)
        })
        .collect()
}

#[test]
fn three_buy_deals_two_per_page() {
    let deals = twelve_deals();
    let buys: Vec<Deal> = filter_deals(&deals, StatusFilter::All, TypeFilter::Buy, "")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(buys.len(), 3);
    assert_eq!(total_pages(buys.len(), 2), 2);

    let first = paginate(&buys, 1, 2);
    assert_eq!(first.items.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 7]);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.total_items, 3);

    let second = paginate(&buys, 2, 2);
    assert_eq!(second.items.iter().map(|d| d.id).collect::<Vec<_>>(), vec![11]);
}

#[test]
fn store_pages_the_seeded_board() {
    let mut store = MainStore::new(ItemsPerPage::Five);
    assert!(store.is_loading());
    assert!(store.load_deals(mock_deals("고려해운", today())));
    assert!(!store.is_loading());
    assert!(!store.load_deals(Vec::new()));

    assert_eq!(store.total_pages(), 3);
    assert!(store.set_current_page(3));
    assert_eq!(store.page().items.len(), 2);
    assert!(!store.set_current_page(4));
    assert_eq!(store.filter().current_page(), 3);

    store.set_type_filter(TypeFilter::Sell);
    assert_eq!(store.filter().current_page(), 1);
    assert_eq!(store.filtered().len(), 7);
    assert!(store.set_status_filter_str("completed"));
    assert_eq!(store.filtered().len(), 3);
    assert_eq!(store.total_pages(), 1);
    assert!(!store.page().has_pagination());
}

#[test]
fn search_50man_ignores_the_all_filters() {
    let mut store = MainStore::default();
    store.load_deals(mock_deals("고려해운", today()));
    store.set_search_term("50만");
    let titles: Vec<&str> = store.filtered().iter().map(|d| d.title.as_str()).collect();
    assert!(!titles.is_empty());
    assert!(titles.iter().all(|t| t.contains("50만")));
    let expected = store.deals().iter().filter(|d| d.title.contains("50만")).count();
    assert_eq!(titles.len(), expected);
}

#[test]
fn empty_results_have_no_pages() {
    let mut store = MainStore::default();
    store.load_deals(mock_deals("고려해운", today()));
    store.set_search_term("존재하지 않는 딜");
    assert_eq!(store.total_pages(), 0);
    assert!(store.page().is_empty());
    assert!(!store.next_page());
}

#[test]
fn disposed_store_stops_notifying() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut store = MainStore::default();
    let sink = seen.clone();
    store.subscribe(move |change| sink.lock().unwrap().push(*change));

    store.load_deals(mock_deals("고려해운", today()));
    store.set_items_per_page(ItemsPerPage::Twenty);
    assert!(store.set_items_per_page_value(50));
    assert!(!store.set_items_per_page_value(7));
    store.dispose();
    store.set_search_term("x");
    store.open_buy();

    let seen = seen.lock().unwrap();
    assert!(seen.contains(&StoreChange::Deals));
    assert_eq!(seen.iter().filter(|c| **c == StoreChange::Filter).count(), 2);
    assert!(!seen.contains(&StoreChange::Modal));
    assert_eq!(store.listener_count(), 0);
    assert!(store.is_disposed());
}
