use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::mock_data::{achievement_catalogue, badge_catalogue};

/// Experience needed per level.
pub const EXP_PER_LEVEL: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    Trade,
    Money,
    Streak,
    Special,
}

impl AchievementCategory {
    pub fn label(self) -> &'static str {
        match self {
            AchievementCategory::Trade => "Trades",
            AchievementCategory::Money => "Volume",
            AchievementCategory::Streak => "Streaks",
            AchievementCategory::Special => "Special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    TradeCount,
    TotalAmount,
    ConsecutiveDays,
    SingleDealAmount,
    DailyTradeCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub kind: RequirementKind,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub requirement: Requirement,
    pub reward_badge: &'static str,
    pub reward_exp: u64,
    pub progress: u64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub rarity: Rarity,
    pub category: AchievementCategory,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Running totals the trade achievements are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TradeStats {
    pub total_trades: u64,
    pub total_amount: u64,
    pub single_deal_amount: u64,
    pub daily_trade_count: u64,
    pub consecutive_days: u64,
    pub last_trade_date: Option<NaiveDate>,
}

impl TradeStats {
    fn value_for(&self, kind: RequirementKind) -> u64 {
        match kind {
            RequirementKind::TradeCount => self.total_trades,
            RequirementKind::TotalAmount => self.total_amount,
            RequirementKind::ConsecutiveDays => self.consecutive_days,
            RequirementKind::SingleDealAmount => self.single_deal_amount,
            RequirementKind::DailyTradeCount => self.daily_trade_count,
        }
    }

    /// Folds one trade of `amount` made on `date` into the totals.
    pub fn record(&mut self, amount: u64, date: NaiveDate) {
        self.total_trades += 1;
        self.total_amount = self.total_amount.saturating_add(amount);
        self.single_deal_amount = self.single_deal_amount.max(amount);

        match self.last_trade_date {
            Some(last) if last == date => {
                self.daily_trade_count += 1;
            }
            Some(last) if last.succ_opt() == Some(date) => {
                self.daily_trade_count = 1;
                self.consecutive_days += 1;
            }
            _ => {
                self.daily_trade_count = 1;
                self.consecutive_days = 1;
            }
        }
        self.last_trade_date = Some(date);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub achievement_id: &'static str,
    pub achievement_name: &'static str,
    pub badge: Option<&'static str>,
    pub exp_gain: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementProgress {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

pub struct AchievementsState {
    pub achievements: Vec<Achievement>,
    pub badges: Vec<Badge>,
    pub user_level: u64,
    pub user_exp: u64,
    pub current_badge: Option<&'static str>,
    pub unlocked_badges: Vec<&'static str>,
    pub trade_stats: TradeStats,
    pub selected: usize,
}

impl Default for AchievementsState {
    fn default() -> Self {
        Self {
            achievements: achievement_catalogue(),
            badges: badge_catalogue(),
            user_level: 1,
            user_exp: 0,
            current_badge: None,
            unlocked_badges: Vec::new(),
            trade_stats: TradeStats::default(),
            selected: 0,
        }
    }
}

impl AchievementsState {
    pub fn update_progress(&mut self, id: &str, progress: u64) -> bool {
        match self.achievements.iter_mut().find(|a| a.id == id) {
            Some(achievement) => {
                achievement.progress = progress;
                true
            }
            None => false,
        }
    }

    /// Completes `id`, unlocking its badge and granting experience. Returns
    /// `None` for unknown or already completed achievements.
    pub fn complete(&mut self, id: &str, at: DateTime<Utc>) -> Option<Completion> {
        let achievement = self.achievements.iter_mut().find(|a| a.id == id && !a.completed)?;
        achievement.completed = true;
        achievement.completed_at = Some(at);
        achievement.progress = achievement.progress.max(achievement.requirement.value);
        let (achievement_id, achievement_name) = (achievement.id, achievement.name);
        let (badge_id, exp_gain) = (achievement.reward_badge, achievement.reward_exp);

        let badge = match self.badges.iter_mut().find(|b| b.id == badge_id) {
            Some(badge) if !badge.unlocked => {
                badge.unlocked = true;
                badge.unlocked_at = Some(at);
                self.unlocked_badges.push(badge.id);
                Some(badge.id)
            }
            _ => None,
        };

        self.user_exp += exp_gain;
        self.user_level = self.user_exp / EXP_PER_LEVEL + 1;
        info!(achievement = achievement_id, exp_gain, level = self.user_level, "achievement completed");

        Some(Completion {
            achievement_id,
            achievement_name,
            badge,
            exp_gain,
        })
    }

    /// Only unlocked badges can be worn.
    pub fn set_current_badge(&mut self, id: &str) -> bool {
        match self.badges.iter().find(|b| b.id == id && b.unlocked) {
            Some(badge) => {
                self.current_badge = Some(badge.id);
                true
            }
            None => false,
        }
    }

    pub fn completed(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.completed).collect()
    }

    pub fn unlocked_badges(&self) -> Vec<&Badge> {
        self.badges.iter().filter(|b| b.unlocked).collect()
    }

    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn progress(&self) -> AchievementProgress {
        let total = self.achievements.len();
        let completed = self.achievements.iter().filter(|a| a.completed).count();
        let percentage = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        AchievementProgress {
            total,
            completed,
            percentage,
        }
    }

    /// Updates progress on every open achievement from `stats` and completes
    /// the ones whose requirement is met.
    pub fn check_trade_achievements(&mut self, stats: &TradeStats, at: DateTime<Utc>) -> Vec<Completion> {
        let mut met = Vec::new();
        for achievement in self.achievements.iter_mut().filter(|a| !a.completed) {
            let value = stats.value_for(achievement.requirement.kind);
            achievement.progress = value.min(achievement.requirement.value);
            if value >= achievement.requirement.value {
                met.push(achievement.id);
            }
        }
        met.into_iter().filter_map(|id| self.complete(id, at)).collect()
    }

    /// Records a trade of `amount` and re-checks the trade achievements.
    pub fn record_trade(&mut self, amount: u64, at: DateTime<Utc>) -> Vec<Completion> {
        self.trade_stats.record(amount, at.date_naive());
        let stats = self.trade_stats;
        self.check_trade_achievements(&stats, at)
    }

    pub fn select_next(&mut self) {
        if !self.achievements.is_empty() {
            self.selected = (self.selected + 1) % self.achievements.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.achievements.is_empty() {
            self.selected = (self.selected + self.achievements.len() - 1) % self.achievements.len();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
