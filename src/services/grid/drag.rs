//! Booking relocation drag.
//!
//! `idle -> dragging -> idle`, mutually exclusive with the selection machine.
//! A press on a span always enters `dragging`; whether it was a click or a
//! drag is only decided on release from the movement threshold.

use egui::{Pos2, Rect, Vec2};

use crate::models::booking::Booking;
use crate::models::settings::GridSettings;

/// Horizontal gap between the pointer and the ghost's left edge
const GHOST_POINTER_GAP: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    pub threshold: f32,
    pub autoscroll_edge: f32,
    pub autoscroll_speed: f32,
    pub ghost_width: f32,
    pub row_height: f32,
}

impl DragConfig {
    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            threshold: settings.drag_threshold,
            autoscroll_edge: settings.autoscroll_edge,
            autoscroll_speed: settings.autoscroll_speed,
            ghost_width: settings.ghost_width,
            row_height: settings.row_height,
        }
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self::from_settings(&GridSettings::default())
    }
}

/// Floating representation of the dragged booking, in scroll-content coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct DragGhost {
    pub label: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub booking: Booking,
    pub origin: Pos2,
    pub pointer: Pos2,
    pub has_moved: bool,
    pub hovered_room: Option<String>,
    pub ghost: DragGhost,
}

/// What a finished drag means to the hosting page
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Released without passing the threshold: open the booking
    Click(Booking),
    /// Dropped on another room
    Moved { booking: Booking, target_room: String },
    /// Dragged but dropped on its own room or outside any row
    Dropped,
}

#[derive(Debug, Clone, Default)]
pub struct BookingDragController {
    config: DragConfig,
    state: Option<DragState>,
}

impl BookingDragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn hovered_room(&self) -> Option<&str> {
        self.state.as_ref()?.hovered_room.as_deref()
    }

    /// Start dragging `booking`; its own room is the initial target.
    pub fn begin(&mut self, booking: &Booking, pointer: Pos2, viewport: Rect, scroll: Vec2) {
        let ghost = DragGhost {
            label: booking.surname(),
            rect: self.ghost_rect(pointer, viewport, scroll),
        };
        log::debug!("begin booking drag id={} room={}", booking.id, booking.room_number);
        self.state = Some(DragState {
            booking: booking.clone(),
            origin: pointer,
            pointer,
            has_moved: false,
            hovered_room: Some(booking.room_number.clone()),
            ghost,
        });
    }

    /// Track the pointer; returns the vertical scroll delta to apply to the container.
    pub fn pointer_moved(
        &mut self,
        pointer: Pos2,
        hovered_room: Option<&str>,
        viewport: Rect,
        scroll: Vec2,
    ) -> f32 {
        let ghost_rect = self.ghost_rect(pointer, viewport, scroll);
        let threshold = self.config.threshold;
        let Some(state) = self.state.as_mut() else {
            return 0.0;
        };

        let distance = (pointer.x - state.origin.x).abs() + (pointer.y - state.origin.y).abs();
        if distance > threshold && !state.has_moved {
            state.has_moved = true;
            log::debug!("booking {} drag passed threshold", state.booking.id);
        }

        state.pointer = pointer;
        state.ghost.rect = ghost_rect;
        if let Some(room) = hovered_room {
            if state.hovered_room.as_deref() != Some(room) {
                state.hovered_room = Some(room.to_string());
            }
        }

        self.autoscroll_delta(pointer, viewport)
    }

    /// Vertical scroll step when the pointer nears the top or bottom edge
    pub fn autoscroll_delta(&self, pointer: Pos2, viewport: Rect) -> f32 {
        if pointer.y < viewport.top() + self.config.autoscroll_edge {
            -self.config.autoscroll_speed
        } else if pointer.y > viewport.bottom() - self.config.autoscroll_edge {
            self.config.autoscroll_speed
        } else {
            0.0
        }
    }

    /// Return to `idle`. Also the cleanup path when the pointer leaves the grid.
    pub fn end(&mut self) -> Option<DragOutcome> {
        let state = self.state.take()?;

        if !state.has_moved {
            log::debug!("booking {} released without moving", state.booking.id);
            return Some(DragOutcome::Click(state.booking));
        }

        match state.hovered_room {
            Some(target) if target != state.booking.room_number => {
                log::debug!(
                    "booking {} dropped on room {} (from {})",
                    state.booking.id,
                    target,
                    state.booking.room_number
                );
                Some(DragOutcome::Moved {
                    booking: state.booking,
                    target_room: target,
                })
            }
            _ => Some(DragOutcome::Dropped),
        }
    }

    fn ghost_rect(&self, pointer: Pos2, viewport: Rect, scroll: Vec2) -> Rect {
        let content = pointer - viewport.min + scroll;
        Rect::from_min_size(
            Pos2::new(
                content.x + GHOST_POINTER_GAP,
                content.y - self.config.row_height / 2.0,
            ),
            Vec2::new(self.config.ghost_width, self.config.row_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use egui::pos2;

    fn booking() -> Booking {
        Booking::new(
            7,
            "A",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        )
        .with_guest("Anna Bianchi")
    }

    fn viewport() -> Rect {
        Rect::from_min_max(pos2(0.0, 100.0), pos2(800.0, 500.0))
    }

    #[test]
    fn test_begin_targets_own_room() {
        let mut drag = BookingDragController::default();
        drag.begin(&booking(), pos2(200.0, 300.0), viewport(), Vec2::ZERO);

        let state = drag.state().unwrap();
        assert_eq!(state.hovered_room.as_deref(), Some("A"));
        assert!(!state.has_moved);
        assert_eq!(state.ghost.label, "Bianchi");
        assert_eq!(state.ghost.rect.min, pos2(206.0, 188.0));
        assert_eq!(state.ghost.rect.width(), 160.0);
    }

    #[test]
    fn test_release_without_movement_is_click() {
        let mut drag = BookingDragController::default();
        drag.begin(&booking(), pos2(200.0, 300.0), viewport(), Vec2::ZERO);
        drag.pointer_moved(pos2(202.0, 301.0), Some("B"), viewport(), Vec2::ZERO);

        match drag.end() {
            Some(DragOutcome::Click(b)) => assert_eq!(b.id, 7),
            other => panic!("expected click, got {:?}", other),
        }
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drag_to_other_room_moves() {
        let mut drag = BookingDragController::default();
        drag.begin(&booking(), pos2(200.0, 300.0), viewport(), Vec2::ZERO);
        drag.pointer_moved(pos2(200.0, 340.0), Some("B"), viewport(), Vec2::ZERO);
        drag.pointer_moved(pos2(200.0, 345.0), None, viewport(), Vec2::ZERO);

        assert_eq!(
            drag.end(),
            Some(DragOutcome::Moved {
                booking: booking(),
                target_room: "B".to_string()
            })
        );
    }

    #[test]
    fn test_drag_back_to_own_room_is_dropped() {
        let mut drag = BookingDragController::default();
        drag.begin(&booking(), pos2(200.0, 300.0), viewport(), Vec2::ZERO);
        drag.pointer_moved(pos2(200.0, 340.0), Some("B"), viewport(), Vec2::ZERO);
        drag.pointer_moved(pos2(210.0, 300.0), Some("A"), viewport(), Vec2::ZERO);
        assert_eq!(drag.end(), Some(DragOutcome::Dropped));
    }

    #[test]
    fn test_threshold_is_sticky() {
        let mut drag = BookingDragController::default();
        drag.begin(&booking(), pos2(200.0, 300.0), viewport(), Vec2::ZERO);
        drag.pointer_moved(pos2(210.0, 300.0), None, viewport(), Vec2::ZERO);
        drag.pointer_moved(pos2(200.0, 300.0), None, viewport(), Vec2::ZERO);
        assert!(drag.state().unwrap().has_moved);
    }

    #[test]
    fn test_autoscroll_near_edges() {
        let mut drag = BookingDragController::default();
        drag.begin(&booking(), pos2(200.0, 300.0), viewport(), Vec2::ZERO);
        assert_eq!(drag.pointer_moved(pos2(200.0, 120.0), None, viewport(), Vec2::ZERO), -18.0);
        assert_eq!(drag.pointer_moved(pos2(200.0, 480.0), None, viewport(), Vec2::ZERO), 18.0);
        assert_eq!(drag.pointer_moved(pos2(200.0, 300.0), None, viewport(), Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_idle_pointer_move_does_nothing() {
        let mut drag = BookingDragController::default();
        assert_eq!(drag.pointer_moved(pos2(0.0, 0.0), Some("B"), viewport(), Vec2::ZERO), 0.0);
        assert_eq!(drag.end(), None);
    }
}
