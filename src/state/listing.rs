//! Sell and buy listing forms.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::DealType;

pub const EXPIRY_OPTIONS: [u32; 4] = [3, 7, 14, 30];
pub const DEFAULT_EXPIRY_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Urgency::Low, Urgency::Normal, Urgency::High, Urgency::Urgent];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|u| *u == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ListingStep {
    #[default]
    Info,
    Price,
    Confirm,
}

impl ListingStep {
    pub fn number(self) -> usize {
        self as usize + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListingField {
    Title,
    Points,
    Choice,
    Description,
    Price,
}

/// A validated listing ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub kind: DealType,
    pub title: String,
    pub description: String,
    pub points: u64,
    pub price: u64,
    pub expiry_days: Option<u32>,
    pub urgency: Option<Urgency>,
}

#[derive(Debug, Clone)]
pub struct ListingForm {
    pub kind: DealType,
    pub step: ListingStep,
    pub focus: ListingField,
    pub title: String,
    pub description: String,
    pub points: String,
    pub price: String,
    pub expiry_days: u32,
    pub urgency: Urgency,
    pub errors: BTreeMap<ListingField, String>,
}

impl ListingForm {
    pub fn new(kind: DealType) -> Self {
        Self {
            kind,
            step: ListingStep::Info,
            focus: ListingField::Title,
            title: String::new(),
            description: String::new(),
            points: String::new(),
            price: String::new(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
            urgency: Urgency::default(),
            errors: BTreeMap::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    fn step_fields(&self) -> &'static [ListingField] {
        match self.step {
            ListingStep::Info => &[ListingField::Title, ListingField::Points, ListingField::Choice, ListingField::Description],
            ListingStep::Price => &[ListingField::Price],
            ListingStep::Confirm => &[],
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.step_fields();
        if let Some(idx) = fields.iter().position(|f| *f == self.focus) {
            self.focus = fields[(idx + 1) % fields.len()];
        } else if let Some(first) = fields.first() {
            self.focus = *first;
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            ListingField::Title => Some(&mut self.title),
            ListingField::Description => Some(&mut self.description),
            ListingField::Points => Some(&mut self.points),
            ListingField::Price => Some(&mut self.price),
            ListingField::Choice => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        let numeric = matches!(self.focus, ListingField::Points | ListingField::Price);
        if numeric && !c.is_ascii_digit() {
            return;
        }
        let focus = self.focus;
        if let Some(text) = self.focused_text() {
            text.push(c);
            self.errors.remove(&focus);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Cycles the step-one option: expiry for sell listings, urgency for buy.
    pub fn cycle_option(&mut self) {
        match self.kind {
            DealType::Sell => {
                let idx = EXPIRY_OPTIONS.iter().position(|d| *d == self.expiry_days).unwrap_or(0);
                self.expiry_days = EXPIRY_OPTIONS[(idx + 1) % EXPIRY_OPTIONS.len()];
            }
            DealType::Buy => self.urgency = self.urgency.next(),
        }
    }

    fn parsed_points(&self) -> Option<u64> {
        self.points.trim().parse().ok().filter(|p| *p > 0)
    }

    fn parsed_price(&self) -> Option<u64> {
        self.price.trim().parse().ok()
    }

    pub fn price_per_point(&self) -> Option<f64> {
        let points = self.parsed_points()?;
        let price = self.parsed_price()?;
        Some(price as f64 / points as f64)
    }

    fn validate_step(&mut self) -> bool {
        self.errors.clear();
        match self.step {
            ListingStep::Info => {
                if self.title.trim().is_empty() {
                    self.errors.insert(ListingField::Title, "Title is required.".to_string());
                }
                if self.parsed_points().is_none() {
                    self.errors.insert(ListingField::Points, "Points must be a positive number.".to_string());
                }
            }
            ListingStep::Price => {
                if self.parsed_price().is_none() {
                    self.errors.insert(ListingField::Price, "Price must be a number.".to_string());
                }
            }
            ListingStep::Confirm => {}
        }
        self.errors.is_empty()
    }

    pub fn next_step(&mut self) -> bool {
        if !self.validate_step() {
            return false;
        }
        self.step = match self.step {
            ListingStep::Info => ListingStep::Price,
            ListingStep::Price | ListingStep::Confirm => ListingStep::Confirm,
        };
        self.focus = self.step_fields().first().copied().unwrap_or(self.focus);
        true
    }

    pub fn prev_step(&mut self) -> bool {
        let prev = match self.step {
            ListingStep::Info => return false,
            ListingStep::Price => ListingStep::Info,
            ListingStep::Confirm => ListingStep::Price,
        };
        self.step = prev;
        self.errors.clear();
        self.focus = self.step_fields().first().copied().unwrap_or(self.focus);
        true
    }

    /// Builds the listing and resets the form. Only valid on the confirm step.
    pub fn submit(&mut self) -> Option<ListingDraft> {
        if self.step != ListingStep::Confirm {
            return None;
        }
        let draft = ListingDraft {
            kind: self.kind,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            points: self.parsed_points()?,
            price: self.parsed_price()?,
            expiry_days: (self.kind == DealType::Sell).then_some(self.expiry_days),
            urgency: (self.kind == DealType::Buy).then_some(self.urgency),
        };
        self.reset();
        Some(draft)
    }
}
