//! Row layout: partitions one room's day axis into free, boundary and merged
//! middle cells in a single left-to-right walk.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::index::{BookingIndex, BookingTone, Span};
use super::window::VisibleWindow;
use crate::models::booking::Booking;
use crate::utils::date::DayKind;

/// Which half of a boundary cell the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellHalf {
    Left,
    Right,
}

/// One booking's half of a boundary cell
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryMark {
    pub booking: Booking,
    pub tone: BookingTone,
}

impl From<&Span> for BoundaryMark {
    fn from(span: &Span) -> Self {
        Self {
            booking: span.booking.clone(),
            tone: span.tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeCell {
    pub column: usize,
    pub date: NaiveDate,
    pub day_kind: DayKind,
    /// Interior of a stay that no merged cell covers
    pub blocked: bool,
}

/// A column where at least one stay starts or ends.
///
/// Check-outs are drawn as the left half-diamond, check-ins as the right one,
/// so back-to-back stays share the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCell {
    pub column: usize,
    pub date: NaiveDate,
    pub day_kind: DayKind,
    pub check_in: Option<BoundaryMark>,
    pub check_out: Option<BoundaryMark>,
    /// Only a stay ends here: a new selection may start on the free half
    pub can_select: bool,
    /// Only a stay starts here: a selection may end on the free half
    pub can_end_on_start: bool,
    /// Surname of a stay that starts and ends on this column
    pub label: Option<String>,
}

impl BoundaryCell {
    /// Booking shown for clicks, tooltips and context menus on the cell
    pub fn booking(&self) -> Option<&Booking> {
        self.check_in
            .as_ref()
            .or(self.check_out.as_ref())
            .map(|mark| &mark.booking)
    }

    /// Booking drawn on the given half, if any
    pub fn booking_on(&self, half: CellHalf) -> Option<&Booking> {
        if self.label.is_some() {
            return self.booking();
        }
        let mark = match half {
            CellHalf::Left => self.check_out.as_ref(),
            CellHalf::Right => self.check_in.as_ref(),
        };
        mark.map(|mark| &mark.booking)
    }
}

/// Interior columns of one stay merged into a single labelled cell
#[derive(Debug, Clone, PartialEq)]
pub struct MiddleCell {
    pub first_column: usize,
    pub column_span: usize,
    pub booking: Booking,
    pub label: String,
    pub tone: BookingTone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Free(FreeCell),
    Boundary(BoundaryCell),
    Middle(MiddleCell),
}

impl GridCell {
    pub fn first_column(&self) -> usize {
        match self {
            GridCell::Free(cell) => cell.column,
            GridCell::Boundary(cell) => cell.column,
            GridCell::Middle(cell) => cell.first_column,
        }
    }

    pub fn column_span(&self) -> usize {
        match self {
            GridCell::Middle(cell) => cell.column_span,
            _ => 1,
        }
    }

    pub fn contains_column(&self, column: usize) -> bool {
        let first = self.first_column();
        column >= first && column < first + self.column_span()
    }

    pub fn booking(&self) -> Option<&Booking> {
        match self {
            GridCell::Free(_) => None,
            GridCell::Boundary(cell) => cell.booking(),
            GridCell::Middle(cell) => Some(&cell.booking),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub room_number: String,
    pub cells: Vec<GridCell>,
}

impl RowLayout {
    pub fn build(room_number: &str, index: &BookingIndex, window: &VisibleWindow) -> Self {
        let spans = index.spans(room_number);

        let mut starts_at: HashMap<usize, Vec<&Span>> = HashMap::new();
        let mut ends_at: HashMap<usize, Vec<&Span>> = HashMap::new();
        let mut middle_at: HashMap<usize, &Span> = HashMap::new();
        for span in spans {
            starts_at.entry(span.start_col).or_default().push(span);
            ends_at.entry(span.end_col).or_default().push(span);
            if span.end_col - span.start_col > 1 {
                // a later span starting on the same column replaces the earlier one
                middle_at.insert(span.start_col + 1, span);
            }
        }

        let mut cells = Vec::with_capacity(window.len());
        let mut column = 0;
        while column < window.len() {
            let Some(date) = window.date_at(column) else {
                break;
            };
            let day_kind = DayKind::of(date);
            let starts = starts_at.get(&column).map(Vec::as_slice).unwrap_or(&[]);
            let ends = ends_at.get(&column).map(Vec::as_slice).unwrap_or(&[]);

            if starts.is_empty() && ends.is_empty() {
                if let Some(span) = middle_at.get(&column) {
                    cells.push(GridCell::Middle(MiddleCell {
                        first_column: column,
                        column_span: span.end_col - span.start_col - 1,
                        booking: span.booking.clone(),
                        label: span.booking.surname(),
                        tone: span.tone,
                    }));
                    column = span.end_col;
                    continue;
                }

                cells.push(GridCell::Free(FreeCell {
                    column,
                    date,
                    day_kind,
                    blocked: index.is_occupied(room_number, column),
                }));
                column += 1;
                continue;
            }

            let label = starts
                .iter()
                .find(|span| span.is_single_column())
                .map(|span| span.booking.surname());
            cells.push(GridCell::Boundary(BoundaryCell {
                column,
                date,
                day_kind,
                check_in: starts.first().map(|span| BoundaryMark::from(*span)),
                check_out: ends.first().map(|span| BoundaryMark::from(*span)),
                can_select: !ends.is_empty() && starts.is_empty(),
                can_end_on_start: !starts.is_empty() && ends.is_empty(),
                label,
            }));
            column += 1;
        }

        Self {
            room_number: room_number.to_string(),
            cells,
        }
    }

    pub fn cell_at(&self, column: usize) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.contains_column(column))
    }

    /// Number of window columns the row's cells cover
    pub fn covered_columns(&self) -> usize {
        self.cells.iter().map(GridCell::column_span).sum()
    }
}
