//! Pure derivations over the deal board: filtering, pagination and ranking.
//!
//! Nothing here caches. Callers re-derive on every read, which keeps the
//! view consistent with whatever filter state they hold.
//!
//! Page counts use the natural ceiling: an empty result has zero pages and
//! the pagination bar is hidden whenever there is at most one page.

use crate::model::{Deal, StatusFilter, TypeFilter};

/// True when `deal` satisfies the status, type and search predicates.
/// `needle` must already be lowercased.
fn deal_matches(deal: &Deal, status: StatusFilter, deal_type: TypeFilter, needle: &str) -> bool {
    status.matches(deal.status)
        && deal_type.matches(deal.deal_type)
        && (needle.is_empty()
            || deal.title.to_lowercase().contains(needle)
            || deal.seller.to_lowercase().contains(needle))
}

/// Stable filter: the result keeps repository order.
pub fn filter_deals<'a>(
    deals: &'a [Deal],
    status: StatusFilter,
    deal_type: TypeFilter,
    search: &str,
) -> Vec<&'a Deal> {
    let needle = search.to_lowercase();
    deals
        .iter()
        .filter(|deal| deal_matches(deal, status, deal_type, &needle))
        .collect()
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn has_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total_items.div_ceil(per_page)
    }
}

/// Slice `items` to `current_page` (1-based). Out-of-range pages, including
/// page 0, produce an empty page rather than an error.
pub fn paginate<T: Clone>(items: &[T], current_page: usize, per_page: usize) -> Page<T> {
    let total_items = items.len();
    let slice = match current_page.checked_sub(1) {
        Some(zero_based) if per_page > 0 => {
            let start = zero_based.saturating_mul(per_page).min(total_items);
            let end = start.saturating_add(per_page).min(total_items);
            &items[start..end]
        }
        _ => &[],
    };
    Page {
        items: slice.to_vec(),
        current_page,
        total_pages: total_pages(total_items, per_page),
        total_items,
        per_page,
    }
}

/// Deals ranked by views, highest first. Ties keep repository order.
pub fn top_by_views(deals: &[Deal], limit: usize) -> Vec<&Deal> {
    let mut ranked: Vec<&Deal> = deals.iter().collect();
    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked.truncate(limit);
    ranked
}

/// Page numbers to show as buttons, at most `width` of them, keeping the
/// current page centred where possible.
pub fn page_window(current_page: usize, total_pages: usize, width: usize) -> Vec<usize> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }
    if total_pages <= width {
        return (1..=total_pages).collect();
    }
    let half = width / 2;
    let start = if current_page <= half + 1 {
        1
    } else if current_page + half >= total_pages {
        total_pages + 1 - width
    } else {
        current_page - half
    };
    (start..start + width).collect()
}

/// 1-based inclusive range of items shown on `current_page`, if any.
pub fn page_range(current_page: usize, per_page: usize, total_items: usize) -> Option<(usize, usize)> {
    let start = current_page.checked_sub(1)?.checked_mul(per_page)?;
    if per_page == 0 || start >= total_items {
        return None;
    }
    Some((start + 1, (start + per_page).min(total_items)))
}
