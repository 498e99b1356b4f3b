//! Visible window: the consecutive dates rendered as grid columns.

use chrono::NaiveDate;

use crate::utils::date::{self, DayKind};

/// Ordered run of consecutive calendar dates. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleWindow {
    anchor: NaiveDate,
    days: Option<usize>,
    dates: Vec<NaiveDate>,
}

impl VisibleWindow {
    /// The full calendar month containing `anchor`
    pub fn month(anchor: NaiveDate) -> Self {
        let first = date::start_of_month(anchor);
        let count = date::days_in_month(first) as usize;
        Self {
            anchor: first,
            days: None,
            dates: Self::run(first, count),
        }
    }

    /// `days` consecutive dates starting at `start`; zero days falls back to the month
    pub fn days(start: NaiveDate, days: usize) -> Self {
        if days == 0 {
            return Self::month(start);
        }
        Self {
            anchor: start,
            days: Some(days),
            dates: Self::run(start, days),
        }
    }

    /// Window anchored at the first of `anchor`'s month, `days` long when set
    pub fn from_anchor(anchor: NaiveDate, days: Option<usize>) -> Self {
        let first = date::start_of_month(anchor);
        match days {
            Some(count) if count > 0 => Self::days(first, count),
            _ => Self::month(first),
        }
    }

    fn run(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
        start.iter_days().take(count).collect()
    }

    /// Same window length, anchored `delta` months away
    pub fn shift_months(&self, delta: i32) -> Self {
        Self::from_anchor(date::add_months(self.anchor, delta), self.days)
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> NaiveDate {
        self.dates.first().copied().unwrap_or(self.anchor)
    }

    pub fn last(&self) -> NaiveDate {
        self.dates.last().copied().unwrap_or(self.anchor)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first() && date <= self.last()
    }

    /// Column of `date`, or `None` when it falls outside the window
    pub fn column_index(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        usize::try_from((date - self.first()).num_days()).ok()
    }

    /// Column of `date`, pinned to the first/last column when outside
    pub fn clamp_to_window(&self, date: NaiveDate) -> usize {
        if date < self.first() {
            0
        } else if date > self.last() {
            self.len().saturating_sub(1)
        } else {
            self.column_index(date).unwrap_or(0)
        }
    }

    pub fn date_at(&self, column: usize) -> Option<NaiveDate> {
        self.dates.get(column).copied()
    }

    pub fn day_kind(&self, column: usize) -> Option<DayKind> {
        self.date_at(column).map(DayKind::of)
    }

    pub fn label(&self) -> String {
        date::month_label(self.anchor)
    }
}
