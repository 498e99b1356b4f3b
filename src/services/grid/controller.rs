//! Grid controller: one instance per rendered grid. Owns the visible window,
//! the derived index and row layouts, and both pointer state machines, and
//! turns pointer input into [`GridAction`]s for the hosting page.

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};

use super::drag::{BookingDragController, DragConfig, DragOutcome, DragState};
use super::geometry::{GridGeometry, GridHit};
use super::index::BookingIndex;
use super::layout::{GridCell, RowLayout};
use super::selection::{Selection, SelectionMachine};
use super::window::VisibleWindow;
use crate::models::booking::Booking;
use crate::models::room::{order_rooms, Room};
use crate::models::settings::GridSettings;

/// Requests the grid hands back to the hosting page
#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    RangeSelected {
        room_number: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    BookingSelected(Booking),
    BookingMoved {
        booking: Booking,
        target_room: String,
    },
    BookingContextMenu {
        booking: Booking,
        x: f32,
        y: f32,
    },
    Back,
}

enum Press {
    Drag(Booking),
    Select,
    Ignore,
}

pub struct GridController {
    settings: GridSettings,
    window: VisibleWindow,
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
    index: BookingIndex,
    rows: Vec<RowLayout>,
    selection: SelectionMachine,
    drag: BookingDragController,
    hovered_column: Option<usize>,
}

impl GridController {
    pub fn new(settings: GridSettings, window: VisibleWindow) -> Self {
        let drag = BookingDragController::new(DragConfig::from_settings(&settings));
        let mut controller = Self {
            settings,
            window,
            rooms: Vec::new(),
            bookings: Vec::new(),
            index: BookingIndex::default(),
            rows: Vec::new(),
            selection: SelectionMachine::new(),
            drag,
            hovered_column: None,
        };
        controller.rebuild();
        controller
    }

    /// Replace rooms and bookings. An in-progress selection survives when its
    /// room is still shown and its start cell is still free.
    pub fn set_data(&mut self, rooms: &[Room], bookings: Vec<Booking>) {
        self.rooms = order_rooms(rooms, self.settings.max_rooms);
        self.bookings = bookings;
        self.rebuild();
        self.revalidate_selection();
    }

    /// Replace the bookings, e.g. after a reload or a committed move
    pub fn set_bookings(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;
        self.rebuild();
        self.revalidate_selection();
    }

    pub fn set_window(&mut self, window: VisibleWindow) {
        self.window = window;
        self.rebuild();
        // indices refer to the old columns
        self.selection.cancel();
    }

    pub fn previous_month(&mut self) {
        self.set_window(self.window.shift_months(-1));
    }

    pub fn next_month(&mut self) {
        self.set_window(self.window.shift_months(1));
    }

    fn rebuild(&mut self) {
        self.index = BookingIndex::build(&self.rooms, &self.bookings, &self.window);
        self.rows = self
            .rooms
            .iter()
            .map(|room| RowLayout::build(&room.room_number, &self.index, &self.window))
            .collect();
        log::debug!(
            "grid rebuilt: {} rooms, {} bookings, {} columns from {}",
            self.rooms.len(),
            self.bookings.len(),
            self.window.len(),
            self.window.first()
        );
    }

    fn revalidate_selection(&mut self) {
        let room_shown = self.selection.current().is_some_and(|selection| {
            self.rooms
                .iter()
                .any(|room| room.room_number == selection.room_number)
        });
        if room_shown {
            self.selection.revalidate(&self.index);
        } else {
            self.selection.cancel();
        }
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn index(&self) -> &BookingIndex {
        &self.index
    }

    pub fn rows(&self) -> &[RowLayout] {
        &self.rows
    }

    pub fn row(&self, room_number: &str) -> Option<&RowLayout> {
        self.rows.iter().find(|row| row.room_number == room_number)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.current()
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.state()
    }

    /// Room currently targeted by a booking drag
    pub fn drop_target(&self) -> Option<&str> {
        self.drag.hovered_room()
    }

    pub fn hovered_column(&self) -> Option<usize> {
        self.hovered_column
    }

    pub fn geometry(&self, origin: Pos2) -> GridGeometry {
        GridGeometry::new(
            &self.settings,
            origin,
            self.rooms.iter().map(|room| room.room_number.clone()).collect(),
            self.window.len(),
        )
    }

    /// Start a selection on a cell. Refused while a booking drag is active or
    /// when the cell lies inside or at the start of a stay.
    pub fn begin_selection(&mut self, room_number: &str, column: usize) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        if !self.index.can_begin_selection(room_number, column) {
            return false;
        }
        self.selection.begin(room_number, column);
        true
    }

    /// Start dragging a booking. Refused while a selection is in progress.
    pub fn begin_booking_drag(
        &mut self,
        booking: &Booking,
        pointer: Pos2,
        viewport: Rect,
        scroll: Vec2,
    ) -> bool {
        if self.selection.is_selecting() {
            return false;
        }
        self.drag.begin(booking, pointer, viewport, scroll);
        true
    }

    /// Route a press to whichever state machine owns the cell under the pointer.
    pub fn pointer_down(&mut self, hit: &GridHit, pointer: Pos2, viewport: Rect, scroll: Vec2) -> bool {
        let press = match self.row(&hit.room_number).and_then(|row| row.cell_at(hit.column)) {
            Some(GridCell::Middle(cell)) => Press::Drag(cell.booking.clone()),
            Some(GridCell::Boundary(cell)) => match cell.booking_on(hit.half) {
                Some(booking) => Press::Drag(booking.clone()),
                None if cell.can_select => Press::Select,
                None => Press::Ignore,
            },
            Some(GridCell::Free(cell)) if !cell.blocked => Press::Select,
            _ => Press::Ignore,
        };

        match press {
            Press::Drag(booking) => self.begin_booking_drag(&booking, pointer, viewport, scroll),
            Press::Select => self.begin_selection(&hit.room_number, hit.column),
            Press::Ignore => false,
        }
    }

    /// Track the pointer. Returns the vertical auto-scroll delta.
    pub fn pointer_moved(
        &mut self,
        hit: Option<&GridHit>,
        hovered_room: Option<&str>,
        pointer: Pos2,
        viewport: Rect,
        scroll: Vec2,
    ) -> f32 {
        self.hovered_column = hit.map(|hit| hit.column);

        if self.selection.is_selecting() {
            if let Some(hit) = hit {
                if self.index.can_extend_selection(&hit.room_number, hit.column) {
                    self.selection.update(&hit.room_number, hit.column, &self.index);
                }
            }
        }

        self.drag.pointer_moved(pointer, hovered_room, viewport, scroll)
    }

    /// Release: finishes whichever gesture is active.
    pub fn pointer_up(&mut self) -> Option<GridAction> {
        if self.selection.is_selecting() {
            return self.finish_selection();
        }

        match self.drag.end()? {
            DragOutcome::Click(booking) => Some(GridAction::BookingSelected(booking)),
            DragOutcome::Moved {
                booking,
                target_room,
            } => Some(GridAction::BookingMoved {
                booking,
                target_room,
            }),
            DragOutcome::Dropped => None,
        }
    }

    /// The pointer left the grid: end both gestures and clear the hover line.
    ///
    /// A press that never moved is not a click once the pointer has left.
    pub fn pointer_left(&mut self) -> Option<GridAction> {
        self.hovered_column = None;

        if self.selection.is_selecting() {
            return self.finish_selection();
        }

        match self.drag.end()? {
            DragOutcome::Moved {
                booking,
                target_room,
            } => Some(GridAction::BookingMoved {
                booking,
                target_room,
            }),
            DragOutcome::Click(_) | DragOutcome::Dropped => None,
        }
    }

    fn finish_selection(&mut self) -> Option<GridAction> {
        let range = self.selection.end(&self.window)?;
        Some(GridAction::RangeSelected {
            room_number: range.room_number,
            start_date: range.start_date,
            end_date: range.end_date,
        })
    }

    /// Secondary click on a booking; `screen_pos` is reported unchanged.
    pub fn context_menu(&self, hit: &GridHit, screen_pos: Pos2) -> Option<GridAction> {
        let booking = match self.row(&hit.room_number)?.cell_at(hit.column)? {
            GridCell::Boundary(cell) => cell.booking_on(hit.half)?,
            cell => cell.booking()?,
        };
        Some(GridAction::BookingContextMenu {
            booking: booking.clone(),
            x: screen_pos.x,
            y: screen_pos.y,
        })
    }

    /// Booking under the pointer, for tooltips
    pub fn booking_at(&self, hit: &GridHit) -> Option<&Booking> {
        match self.row(&hit.room_number)?.cell_at(hit.column)? {
            GridCell::Boundary(cell) => cell.booking_on(hit.half),
            cell => cell.booking(),
        }
    }

    pub fn back(&mut self) -> GridAction {
        self.selection.cancel();
        self.drag.end();
        GridAction::Back
    }
}
