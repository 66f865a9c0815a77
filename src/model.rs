// src/model.rs
// Marketplace records and the enumerated filter domains.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type DealId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Selling,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealType {
    Buy,
    Sell,
}

/// A buy or sell listing for a quantity of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: DealId,
    pub title: String,
    /// Display name, not a unique user id.
    pub seller: String,
    pub points: u64,
    pub price: u64,
    pub status: DealStatus,
    #[serde(rename = "type")]
    pub deal_type: DealType,
    pub views: u64,
    pub seller_rating: f32,
    pub seller_deals: u32,
    pub company: String,
    /// Informational only, nothing expires deals.
    pub expires_at: NaiveDate,
}

impl Deal {
    pub fn price_per_point(&self) -> f64 {
        if self.points == 0 {
            0.0
        } else {
            self.price as f64 / self.points as f64
        }
    }
}

/// A filter value outside its enumerated domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} option: {value}")]
pub struct InvalidOption {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Selling,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Selling, StatusFilter::Completed];

    pub fn matches(self, status: DealStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Selling => status == DealStatus::Selling,
            StatusFilter::Completed => status == DealStatus::Completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All statuses",
            StatusFilter::Selling => "Selling",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

impl FromStr for StatusFilter {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "selling" => Ok(StatusFilter::Selling),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(InvalidOption { field: "status", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Buy,
    Sell,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Sell, TypeFilter::Buy];

    pub fn matches(self, deal_type: DealType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Buy => deal_type == DealType::Buy,
            TypeFilter::Sell => deal_type == DealType::Sell,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "All types",
            TypeFilter::Buy => "Buy",
            TypeFilter::Sell => "Sell",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

impl FromStr for TypeFilter {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            "buy" => Ok(TypeFilter::Buy),
            "sell" => Ok(TypeFilter::Sell),
            other => Err(InvalidOption { field: "type", value: other.to_string() }),
        }
    }
}

/// Page sizes offered by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum ItemsPerPage {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl ItemsPerPage {
    pub const ALL: [ItemsPerPage; 4] = [
        ItemsPerPage::Five,
        ItemsPerPage::Ten,
        ItemsPerPage::Twenty,
        ItemsPerPage::Fifty,
    ];

    pub fn get(self) -> usize {
        match self {
            ItemsPerPage::Five => 5,
            ItemsPerPage::Ten => 10,
            ItemsPerPage::Twenty => 20,
            ItemsPerPage::Fifty => 50,
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

impl TryFrom<usize> for ItemsPerPage {
    type Error = InvalidOption;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|option| option.get() == value)
            .ok_or_else(|| InvalidOption { field: "items per page", value: value.to_string() })
    }
}

impl From<ItemsPerPage> for usize {
    fn from(value: ItemsPerPage) -> Self {
        value.get()
    }
}

impl fmt::Display for ItemsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per page", self.get())
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    options[(idx + 1) % options.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_only_their_domain() {
        assert_eq!("selling".parse::<StatusFilter>(), Ok(StatusFilter::Selling));
        assert_eq!("buy".parse::<TypeFilter>(), Ok(TypeFilter::Buy));
        assert!("pending".parse::<StatusFilter>().is_err());
        assert!("Buy".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn items_per_page_accepts_only_offered_sizes() {
        assert_eq!(ItemsPerPage::try_from(20), Ok(ItemsPerPage::Twenty));
        assert!(ItemsPerPage::try_from(2).is_err());
        assert!(ItemsPerPage::try_from(0).is_err());
        assert_eq!(ItemsPerPage::default().get(), 10);
    }

    #[test]
    fn options_cycle_back_to_start() {
        assert_eq!(ItemsPerPage::Fifty.next(), ItemsPerPage::Five);
        assert_eq!(StatusFilter::Completed.next(), StatusFilter::All);
        assert_eq!(TypeFilter::All.next(), TypeFilter::Sell);
    }

    #[test]
    fn deal_serializes_with_camel_case_keys() {
        let deal = Deal {
            id: 1,
            title: "t".into(),
            seller: "s".into(),
            points: 100,
            price: 90,
            status: DealStatus::Selling,
            deal_type: DealType::Buy,
            views: 0,
            seller_rating: 4.5,
            seller_deals: 3,
            company: "c".into(),
            expires_at: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        };
        let json = serde_json::to_value(&deal).unwrap();
        assert_eq!(json["type"], "buy");
        assert_eq!(json["sellerRating"], 4.5);
        assert_eq!(json["expiresAt"], "2024-01-08");
        assert!((deal.price_per_point() - 0.9).abs() < f64::EPSILON);
    }
}
