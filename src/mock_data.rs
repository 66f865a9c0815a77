// src/mock_data.rs
// Seed data standing in for a backend: the deal board, company domains,
// recent trades, the point price series and the achievement catalogue.

use chrono::{Days, NaiveDate};

use crate::model::{Deal, DealStatus, DealType};
use crate::state::achievements::{
    Achievement, AchievementCategory, Badge, Rarity, Requirement, RequirementKind,
};

pub const DEFAULT_COMPANY_NAME: &str = "Black Market";

/// Listings expire this many days after they are seeded.
pub const LISTING_LIFETIME_DAYS: u64 = 7;

/// A company whose employees may sign up, keyed by its email domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub domain: &'static str,
}

pub const COMPANIES: [Company; 3] = [
    Company { id: "korea", name: "고려해운", description: "Shipping and logistics", domain: "ekmtc.com" },
    Company { id: "tescom", name: "테스콤", description: "Electronics and telecom", domain: "tescom.com" },
    Company { id: "samsungcard", name: "삼성카드", description: "Finance and credit cards", domain: "samsungcard.com" },
];

pub fn company_for_domain(domain: &str) -> &'static str {
    COMPANIES
        .iter()
        .find(|c| c.domain.eq_ignore_ascii_case(domain))
        .map(|c| c.name)
        .unwrap_or(DEFAULT_COMPANY_NAME)
}

pub fn company_for_email(email: &str) -> &'static str {
    email
        .rsplit_once('@')
        .map(|(_, domain)| company_for_domain(domain))
        .unwrap_or(DEFAULT_COMPANY_NAME)
}

type SeedRow = (&'static str, &'static str, u64, u64, DealStatus, DealType, u64, f32, u32);

const SEED_DEALS: [SeedRow; 12] = [
    ("고급 식권 포인트 50만점", "익명거래자1", 500_000, 450_000, DealStatus::Selling, DealType::Sell, 127, 4.8, 23),
    ("프리미엄 식권 포인트 30만점", "익명거래자2", 300_000, 285_000, DealStatus::Completed, DealType::Sell, 89, 4.9, 45),
    ("특가 식권 포인트 100만점", "익명거래자3", 1_000_000, 900_000, DealStatus::Selling, DealType::Sell, 203, 4.7, 67),
    ("식권 포인트 80만점 구매 희망", "구매희망자1", 800_000, 720_000, DealStatus::Selling, DealType::Buy, 156, 4.6, 34),
    ("식권 포인트 200만점 대량 구매", "대량구매자1", 2_000_000, 1_800_000, DealStatus::Selling, DealType::Buy, 98, 4.9, 89),
    ("식권 포인트 150만점 할인 판매", "익명거래자4", 1_500_000, 1_350_000, DealStatus::Selling, DealType::Sell, 167, 4.6, 32),
    ("식권 포인트 400만점 구매 희망", "구매희망자2", 4_000_000, 3_600_000, DealStatus::Selling, DealType::Buy, 134, 4.8, 56),
    ("식권 포인트 75만점 특가", "익명거래자5", 750_000, 675_000, DealStatus::Completed, DealType::Sell, 92, 4.4, 18),
    ("식권 포인트 120만점 구매", "구매희망자3", 1_200_000, 1_080_000, DealStatus::Selling, DealType::Buy, 89, 4.7, 41),
    ("식권 포인트 90만점 판매", "익명거래자6", 900_000, 810_000, DealStatus::Selling, DealType::Sell, 178, 4.9, 67),
    ("식권 포인트 250만점 대량 구매", "대량구매자2", 2_500_000, 2_250_000, DealStatus::Selling, DealType::Buy, 89, 4.5, 23),
    ("식권 포인트 180만점 할인", "익명거래자7", 1_800_000, 1_620_000, DealStatus::Completed, DealType::Sell, 156, 4.3, 29),
];

/// The seeded board for `company`, expiring a week after `today`.
pub fn mock_deals(company: &str, today: NaiveDate) -> Vec<Deal> {
    let expires_at = today
        .checked_add_days(Days::new(LISTING_LIFETIME_DAYS))
        .unwrap_or(today);
    SEED_DEALS
        .iter()
        .zip(1..)
        .map(|(&(title, seller, points, price, status, deal_type, views, rating, deals), id)| Deal {
            id,
            title: title.to_string(),
            seller: seller.to_string(),
            points,
            price,
            status,
            deal_type,
            views,
            seller_rating: rating,
            seller_deals: deals,
            company: company.to_string(),
            expires_at,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentTrade {
    pub deal_type: DealType,
    pub user: &'static str,
    pub points: &'static str,
    pub price: &'static str,
    pub time: &'static str,
}

pub const RECENT_TRADES: [RecentTrade; 5] = [
    RecentTrade { deal_type: DealType::Buy, user: "익명거래자1", points: "50만", price: "₩450K", time: "2 min ago" },
    RecentTrade { deal_type: DealType::Sell, user: "익명거래자2", points: "30만", price: "₩285K", time: "5 min ago" },
    RecentTrade { deal_type: DealType::Buy, user: "익명거래자3", points: "100만", price: "₩900K", time: "8 min ago" },
    RecentTrade { deal_type: DealType::Sell, user: "익명거래자4", points: "25만", price: "₩240K", time: "12 min ago" },
    RecentTrade { deal_type: DealType::Buy, user: "익명거래자5", points: "75만", price: "₩675K", time: "15 min ago" },
];

/// Hourly cash price of 100k points over the last day.
pub const POINT_PRICE_SERIES: [(u8, u64); 25] = [
    (0, 95_000), (1, 94_800), (2, 94_500), (3, 94_200), (4, 94_000),
    (5, 93_800), (6, 94_500), (7, 95_200), (8, 96_000), (9, 96_800),
    (10, 97_500), (11, 98_200), (12, 99_000), (13, 99_500), (14, 100_000),
    (15, 100_500), (16, 101_000), (17, 101_500), (18, 102_000), (19, 101_500),
    (20, 101_000), (21, 100_500), (22, 100_000), (23, 99_500), (24, 99_000),
];

#[allow(clippy::too_many_arguments)]
fn achievement(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: AchievementCategory,
    kind: RequirementKind,
    value: u64,
    badge: &'static str,
    exp: u64,
) -> Achievement {
    Achievement {
        id,
        name,
        description,
        category,
        requirement: Requirement { kind, value },
        reward_badge: badge,
        reward_exp: exp,
        progress: 0,
        completed: false,
        completed_at: None,
    }
}

pub fn achievement_catalogue() -> Vec<Achievement> {
    use AchievementCategory::{Money, Special, Streak, Trade};
    use RequirementKind::{ConsecutiveDays, DailyTradeCount, SingleDealAmount, TotalAmount, TradeCount};
    vec![
        achievement("first_trade", "첫 거래", "Complete your first trade", Trade, TradeCount, 1, "first_trade", 100),
        achievement("trade_10", "거래 초보자", "Complete 10 trades", Trade, TradeCount, 10, "trade_beginner", 200),
        achievement("trade_50", "거래 중급자", "Complete 50 trades", Trade, TradeCount, 50, "trade_intermediate", 500),
        achievement("trade_100", "거래 전문가", "Complete 100 trades", Trade, TradeCount, 100, "trade_expert", 1000),
        achievement("trade_500", "거래왕", "Complete 500 trades", Trade, TradeCount, 500, "trade_king", 5000),
        achievement("money_100k", "소액 거래자", "Trade ₩1,000,000 in total", Money, TotalAmount, 1_000_000, "small_trader", 300),
        achievement("money_10m", "중간 거래자", "Trade ₩10,000,000 in total", Money, TotalAmount, 10_000_000, "medium_trader", 800),
        achievement("money_100m", "대부", "Trade ₩100,000,000 in total", Money, TotalAmount, 100_000_000, "big_trader", 2000),
        achievement("streak_7", "불꽃 거래자", "Trade 7 days in a row", Streak, ConsecutiveDays, 7, "fire_trader", 400),
        achievement("streak_30", "번개 거래자", "Trade 30 days in a row", Streak, ConsecutiveDays, 30, "lightning_trader", 1500),
        achievement("big_deal", "정확한 손길", "Close a single deal of ₩1,000,000 or more", Special, SingleDealAmount, 1_000_000, "precise_hand", 600),
        achievement("daily_10", "행운의 여신", "Trade 10 or more times in one day", Special, DailyTradeCount, 10, "lucky_goddess", 400),
    ]
}

fn badge(id: &'static str, name: &'static str, rarity: Rarity, category: AchievementCategory) -> Badge {
    Badge {
        id,
        name,
        rarity,
        category,
        unlocked: false,
        unlocked_at: None,
    }
}

pub fn badge_catalogue() -> Vec<Badge> {
    use AchievementCategory::{Money, Special, Streak, Trade};
    vec![
        badge("first_trade", "첫 거래", Rarity::Common, Trade),
        badge("trade_beginner", "거래 초보자", Rarity::Common, Trade),
        badge("trade_intermediate", "거래 중급자", Rarity::Uncommon, Trade),
        badge("trade_expert", "거래 전문가", Rarity::Rare, Trade),
        badge("trade_king", "거래왕", Rarity::Legendary, Trade),
        badge("small_trader", "소액 거래자", Rarity::Common, Money),
        badge("medium_trader", "중간 거래자", Rarity::Uncommon, Money),
        badge("big_trader", "대부", Rarity::Epic, Money),
        badge("fire_trader", "불꽃 거래자", Rarity::Uncommon, Streak),
        badge("lightning_trader", "번개 거래자", Rarity::Rare, Streak),
        badge("precise_hand", "정확한 손길", Rarity::Uncommon, Special),
        badge("lucky_goddess", "행운의 여신", Rarity::Rare, Special),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn seeded_board_has_unique_ids_and_a_week_of_life() {
        let deals = mock_deals("고려해운", today());
        assert_eq!(deals.len(), 12);
        let ids: HashSet<_> = deals.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 12);
        assert!(deals.iter().all(|d| d.expires_at == NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()));
        assert_eq!(deals.iter().filter(|d| d.deal_type == DealType::Buy).count(), 5);
        assert!(deals.iter().all(|d| d.points > 0 && (0.0..=5.0).contains(&d.seller_rating)));
    }

    #[test]
    fn email_domain_resolves_company() {
        assert_eq!(company_for_email("test1@ekmtc.com"), "고려해운");
        assert_eq!(company_for_email("a@SamsungCard.com"), "삼성카드");
        assert_eq!(company_for_email("a@example.com"), DEFAULT_COMPANY_NAME);
        assert_eq!(company_for_email("no-at-sign"), DEFAULT_COMPANY_NAME);
    }

    #[test]
    fn every_achievement_rewards_a_known_badge() {
        let badges: HashSet<_> = badge_catalogue().iter().map(|b| b.id).collect();
        let achievements = achievement_catalogue();
        assert_eq!(achievements.len(), 12);
        assert!(achievements.iter().all(|a| badges.contains(a.reward_badge)));
    }
}
