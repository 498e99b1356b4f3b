// Booking module
// Hotel stay model as exchanged with the booking REST API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Board plan attached to a stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Treatment {
    #[default]
    RoomBreakfast,
    HalfBoard,
    FullBoard,
}

impl Treatment {
    /// Human readable label used in tooltips
    pub fn label(&self) -> &'static str {
        match self {
            Treatment::RoomBreakfast => "B&B",
            Treatment::HalfBoard => "Half board",
            Treatment::FullBoard => "Full board",
        }
    }
}

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Inserted,
    Confirmed,
    Arrived,
    Cancelled,
    Departed,
}

impl BookingStatus {
    /// Whether a booking in this status still holds its room
    pub fn holds_room(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::Departed)
    }

    /// Priority used to pick the representative booking of a room
    pub fn priority(&self) -> u8 {
        match self {
            BookingStatus::Arrived => 3,
            BookingStatus::Confirmed => 2,
            BookingStatus::Inserted => 1,
            BookingStatus::Cancelled | BookingStatus::Departed => 0,
        }
    }
}

/// Meal served on the arrival day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInMeal {
    Breakfast,
    Lunch,
    Dinner,
}

/// A room reservation.
///
/// The stay occupies every date in `[check_in_date, check_out_date)` for overlap
/// purposes; the grid still draws the check-out day as the span's end boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub room_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_meal: Option<CheckInMeal>,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub treatment: Treatment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
}

impl Booking {
    /// Create a booking with the fields the grid needs; everything else defaults.
    ///
    /// # Examples
    /// ```
    /// use booking_grid::models::booking::Booking;
    /// use chrono::NaiveDate;
    ///
    /// let check_in = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let check_out = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
    /// let booking = Booking::new(1, "101", check_in, check_out);
    /// assert_eq!(booking.nights(), 4);
    /// ```
    pub fn new(
        id: i64,
        room_number: impl Into<String>,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            room_number: room_number.into(),
            guest_username: None,
            guest_full_name: None,
            guest_first_name: None,
            guest_last_name: None,
            check_in_meal: None,
            adults: 0,
            children: 0,
            infants: 0,
            check_in_date,
            check_out_date,
            price: None,
            treatment: Treatment::default(),
            notes: None,
            status: BookingStatus::default(),
            table_number: None,
        }
    }

    /// Set the status (chainable, mostly for fixtures)
    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the guest full name (chainable)
    pub fn with_guest(mut self, full_name: impl Into<String>) -> Self {
        self.guest_full_name = Some(full_name.into());
        self
    }

    /// Set the party size (chainable)
    pub fn with_party(mut self, adults: u32, children: u32, infants: u32) -> Self {
        self.adults = adults;
        self.children = children;
        self.infants = infants;
        self
    }

    /// Validate the booking
    pub fn validate(&self) -> Result<(), String> {
        if self.room_number.trim().is_empty() {
            return Err("Booking room number cannot be empty".to_string());
        }

        if self.check_out_date < self.check_in_date {
            return Err("Booking check-out date must not precede check-in date".to_string());
        }

        if let Some(price) = self.price {
            if price < 0.0 {
                return Err("Booking price cannot be negative".to_string());
            }
        }

        Ok(())
    }

    /// Half-open interval overlap: touching endpoints do not count.
    pub fn overlaps(&self, other: &Booking) -> bool {
        self.check_in_date < other.check_out_date && self.check_out_date > other.check_in_date
    }

    /// Whether the stay covers `date`, counting the check-out day
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in_date <= date && self.check_out_date >= date
    }

    /// Number of nights; zero for degenerate bookings
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days().max(0)
    }

    /// Surname shown on grid spans
    pub fn surname(&self) -> String {
        if let Some(full_name) = self.guest_full_name.as_deref() {
            return full_name
                .split_whitespace()
                .last()
                .unwrap_or_default()
                .to_string();
        }
        self.guest_username.clone().unwrap_or_default()
    }

    /// "Last First" label, falling back to the full name
    pub fn guest_label(&self) -> String {
        if self.guest_last_name.is_some() || self.guest_first_name.is_some() {
            return [self.guest_last_name.as_deref(), self.guest_first_name.as_deref()]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
        }
        self.guest_full_name.clone().unwrap_or_default()
    }
}

/// Partial update sent with `PUT /api/bookings/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Treatment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    /// Patch that only reassigns the room
    pub fn room(room_number: impl Into<String>) -> Self {
        Self {
            room_number: Some(room_number.into()),
            ..Self::default()
        }
    }

    /// Apply the patch locally, as the server would
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(room_number) = &self.room_number {
            booking.room_number = room_number.clone();
        }
        if let Some(adults) = self.adults {
            booking.adults = adults;
        }
        if let Some(children) = self.children {
            booking.children = children;
        }
        if let Some(infants) = self.infants {
            booking.infants = infants;
        }
        if let Some(check_in) = self.check_in_date {
            booking.check_in_date = check_in;
        }
        if let Some(check_out) = self.check_out_date {
            booking.check_out_date = check_out;
        }
        if self.price.is_some() {
            booking.price = self.price;
        }
        if let Some(treatment) = self.treatment {
            booking.treatment = treatment;
        }
        if self.notes.is_some() {
            booking.notes = self.notes.clone();
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
    }
}
