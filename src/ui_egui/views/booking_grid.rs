//! Booking grid view: paints the controller's row layouts and feeds pointer
//! input back into it. All gesture logic lives in `GridController`; this file
//! only projects it onto egui.

use egui::{Align2, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use super::palette::{with_alpha, GridPalette};
use crate::models::booking::Booking;
use crate::services::grid::{
    BookingTone, GridAction, GridCell, GridController, GridGeometry, GridHit, Selection,
};
use crate::utils::date;

/// Scrollable month grid drawn from a [`GridController`]
pub struct BookingGridView {
    scroll_offset: Vec2,
    pending_scroll: f32,
    menu_open: bool,
}

impl Default for BookingGridView {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingGridView {
    pub fn new() -> Self {
        Self {
            scroll_offset: Vec2::ZERO,
            pending_scroll: 0.0,
            menu_open: false,
        }
    }

    /// Booking tooltips stay hidden while the host shows a context menu
    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, controller: &mut GridController) -> Option<GridAction> {
        let palette = GridPalette::from_visuals(ui.visuals());

        let mut scroll = egui::ScrollArea::both()
            .id_source("booking_grid")
            .auto_shrink([false, false])
            .drag_to_scroll(false);
        if self.pending_scroll != 0.0 {
            scroll = scroll.vertical_scroll_offset((self.scroll_offset.y + self.pending_scroll).max(0.0));
            self.pending_scroll = 0.0;
        }

        let output = scroll.show(ui, |ui| self.contents(ui, controller, &palette));
        self.scroll_offset = output.state.offset;
        output.inner
    }

    fn contents(
        &mut self,
        ui: &mut egui::Ui,
        controller: &mut GridController,
        palette: &GridPalette,
    ) -> Option<GridAction> {
        let viewport = ui.clip_rect();
        let size = controller.geometry(Pos2::ZERO).content_size();
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let geometry = controller.geometry(rect.min);

        let (hover_pos, pressed, released) = ui.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let inside = hover_pos.filter(|pos| viewport.contains(*pos) && rect.contains(*pos));

        let mut action = None;
        let mut tooltip_booking: Option<Booking> = None;
        match inside {
            Some(pos) => {
                let hit = geometry.hit_test(pos);
                if pressed {
                    if let Some(hit) = &hit {
                        controller.pointer_down(hit, pos, viewport, self.scroll_offset);
                    }
                }

                let delta = controller.pointer_moved(
                    hit.as_ref(),
                    geometry.room_at(pos),
                    pos,
                    viewport,
                    self.scroll_offset,
                );
                if delta != 0.0 {
                    self.pending_scroll += delta;
                    ui.ctx().request_repaint();
                }

                if released {
                    action = controller.pointer_up();
                }

                if let Some(hit) = &hit {
                    if response.secondary_clicked() {
                        action = controller.context_menu(hit, pos).or(action);
                    }
                    let menu_open =
                        self.menu_open || matches!(action, Some(GridAction::BookingContextMenu { .. }));
                    tooltip_booking = tooltip_for(controller, hit, menu_open);
                }
            }
            None => {
                let active = controller.selection().is_some()
                    || controller.drag_state().is_some()
                    || controller.hovered_column().is_some();
                if active {
                    action = controller.pointer_left();
                }
            }
        }

        let painter = ui.painter_at(rect);
        paint_header(&painter, &geometry, controller, palette);
        paint_rows(&painter, &geometry, controller, palette);
        paint_hover_line(&painter, &geometry, controller, palette, rect);
        paint_ghost(ui.painter(), controller, palette, rect);

        if let Some(booking) = tooltip_booking {
            response.on_hover_ui_at_pointer(|ui| booking_tooltip(ui, &booking));
        }

        action
    }
}

fn paint_header(painter: &Painter, geometry: &GridGeometry, controller: &GridController, palette: &GridPalette) {
    let window = controller.window();
    let corner = Rect::from_min_size(
        geometry.origin,
        Vec2::new(geometry.room_label_width, geometry.header_height),
    );
    painter.rect_filled(corner, 0.0, palette.header_bg);
    painter.text(
        corner.left_center() + Vec2::new(8.0, 0.0),
        Align2::LEFT_CENTER,
        "Room",
        FontId::proportional(13.0),
        palette.text_muted,
    );

    for (column, day) in window.dates().iter().enumerate() {
        let rect = geometry.header_rect(column);
        let kind = date::DayKind::of(*day);
        let fill = if kind.is_weekend() {
            palette.day_bg(kind)
        } else {
            palette.header_bg
        };
        painter.rect_filled(rect, 0.0, fill);
        painter.rect_stroke(rect, 0.0, Stroke::new(0.5, palette.border));
        painter.text(
            rect.center_top() + Vec2::new(0.0, 4.0),
            Align2::CENTER_TOP,
            day.format("%d").to_string(),
            FontId::proportional(12.0),
            palette.text,
        );
        painter.text(
            rect.center_bottom() - Vec2::new(0.0, 4.0),
            Align2::CENTER_BOTTOM,
            day.format("%a").to_string(),
            FontId::proportional(10.0),
            palette.text_muted,
        );
    }
}

fn paint_rows(painter: &Painter, geometry: &GridGeometry, controller: &GridController, palette: &GridPalette) {
    let selection = controller.selection();
    let dragging = controller.drag_state().is_some_and(|state| state.has_moved);

    for (row, (room, layout)) in controller.rooms().iter().zip(controller.rows()).enumerate() {
        let label_rect = geometry.label_rect(row);
        painter.rect_filled(label_rect, 0.0, palette.label_bg);
        painter.rect_stroke(label_rect, 0.0, Stroke::new(0.5, palette.border));
        painter
            .with_clip_rect(label_rect.shrink(2.0))
            .text(
                label_rect.left_center() + Vec2::new(8.0, 0.0),
                Align2::LEFT_CENTER,
                room.label(),
                FontId::proportional(13.0),
                palette.text,
            );

        for cell in &layout.cells {
            paint_cell(painter, geometry, row, &room.room_number, cell, selection, palette);
        }

        if dragging && controller.drop_target() == Some(room.room_number.as_str()) {
            let days = geometry.span_rect(row, 0, geometry.columns);
            painter.rect_stroke(label_rect.union(days), 0.0, Stroke::new(2.0, palette.drop_target));
        }
    }
}

fn paint_cell(
    painter: &Painter,
    geometry: &GridGeometry,
    row: usize,
    room_number: &str,
    cell: &GridCell,
    selection: Option<&Selection>,
    palette: &GridPalette,
) {
    let border = Stroke::new(0.5, palette.border);
    let selected = |column: usize| selection.is_some_and(|s| s.contains(room_number, column));

    match cell {
        GridCell::Free(free) => {
            let rect = geometry.cell_rect(row, free.column);
            let fill = if free.blocked {
                palette.blocked_bg
            } else if selected(free.column) {
                palette.selection
            } else {
                palette.day_bg(free.day_kind)
            };
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, border);
        }
        GridCell::Middle(middle) => {
            let rect = geometry.span_rect(row, middle.first_column, middle.column_span);
            painter.rect_filled(rect, 0.0, palette.tone(middle.tone));
            painter.rect_stroke(rect, 0.0, border);
            paint_label(painter, rect, &middle.label, palette);
        }
        GridCell::Boundary(boundary) => {
            let rect = geometry.cell_rect(row, boundary.column);
            let selectable = boundary.can_select || boundary.can_end_on_start;
            let fill = if selectable && selected(boundary.column) {
                palette.selection
            } else {
                palette.day_bg(boundary.day_kind)
            };
            painter.rect_filled(rect, 0.0, fill);

            match (&boundary.label, &boundary.check_in) {
                (Some(label), Some(mark)) => {
                    painter.rect_filled(rect.shrink2(Vec2::new(0.0, 2.0)), 3.0, palette.tone(mark.tone));
                    paint_label(painter, rect, label, palette);
                }
                _ => {
                    if let Some(mark) = &boundary.check_out {
                        painter.add(Shape::convex_polygon(
                            vec![rect.left_top(), rect.center(), rect.left_bottom()],
                            palette.tone(mark.tone),
                            Stroke::NONE,
                        ));
                    }
                    if let Some(mark) = &boundary.check_in {
                        painter.add(Shape::convex_polygon(
                            vec![rect.right_top(), rect.right_bottom(), rect.center()],
                            palette.tone(mark.tone),
                            Stroke::NONE,
                        ));
                    }
                }
            }
            painter.rect_stroke(rect, 0.0, border);
        }
    }
}

fn paint_label(painter: &Painter, rect: Rect, label: &str, palette: &GridPalette) {
    painter.with_clip_rect(rect.shrink(2.0)).text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(11.0),
        palette.text,
    );
}

fn paint_hover_line(
    painter: &Painter,
    geometry: &GridGeometry,
    controller: &GridController,
    palette: &GridPalette,
    rect: Rect,
) {
    let Some(column) = controller.hovered_column() else {
        return;
    };
    let x = geometry.column_center_x(column);
    painter.line_segment(
        [Pos2::new(x, geometry.rows_top()), Pos2::new(x, rect.bottom())],
        Stroke::new(1.0, palette.hover_line),
    );
}

/// Ghost rects are kept in content coordinates; `content` is the content's screen rect.
fn paint_ghost(painter: &Painter, controller: &GridController, palette: &GridPalette, content: Rect) {
    let Some(state) = controller.drag_state().filter(|state| state.has_moved) else {
        return;
    };
    let rect = state.ghost.rect.translate(content.min.to_vec2());
    let tone = palette.tone(BookingTone::of(state.booking.status));
    painter.rect_filled(rect, 4.0, with_alpha(tone, 210));
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, palette.drop_target));
    painter.with_clip_rect(rect.shrink(2.0)).text(
        rect.left_center() + Vec2::new(6.0, 0.0),
        Align2::LEFT_CENTER,
        format!("{} · {}", state.ghost.label, state.booking.room_number),
        FontId::proportional(12.0),
        palette.text,
    );
}

/// Booking under `hit` worth a tooltip; none during a gesture or with a menu up
fn tooltip_for(controller: &GridController, hit: &GridHit, menu_open: bool) -> Option<Booking> {
    if menu_open || controller.selection().is_some() || controller.drag_state().is_some() {
        return None;
    }
    controller.booking_at(hit).cloned()
}

fn booking_tooltip(ui: &mut egui::Ui, booking: &Booking) {
    let guest = booking.guest_label();
    ui.strong(if guest.is_empty() { booking.surname() } else { guest });
    ui.label(format!("Room {}", booking.room_number));
    ui.label(format!(
        "{} → {}",
        date::to_ymd(booking.check_in_date),
        date::to_ymd(booking.check_out_date)
    ));
    ui.label(format!(
        "Adults {} · Children {} · Infants {}",
        booking.adults, booking.children, booking.infants
    ));
    ui.label(booking.treatment.label());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room::Room;
    use crate::models::settings::GridSettings;
    use crate::services::grid::{CellHalf, VisibleWindow};
    use chrono::NaiveDate;
    use egui::pos2;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn controller() -> GridController {
        let mut controller = GridController::new(GridSettings::default(), VisibleWindow::month(date(1)));
        controller.set_data(
            &[Room::new(1, "101", "Double")],
            vec![Booking::new(7, "101", date(6), date(9)).with_guest("Anna Bianchi")],
        );
        controller
    }

    fn hit(column: usize) -> GridHit {
        GridHit {
            row: 0,
            room_number: "101".to_string(),
            column,
            half: CellHalf::Left,
        }
    }

    #[test]
    fn test_tooltip_over_booking() {
        let controller = controller();
        assert_eq!(tooltip_for(&controller, &hit(6), false).map(|b| b.id), Some(7));
        assert!(tooltip_for(&controller, &hit(1), false).is_none());
    }

    #[test]
    fn test_no_tooltip_while_menu_open() {
        let controller = controller();
        assert!(tooltip_for(&controller, &hit(6), true).is_none());
    }

    #[test]
    fn test_no_tooltip_during_drag() {
        let mut controller = controller();
        let viewport = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(1200.0, 600.0));
        assert!(controller.pointer_down(&hit(6), pos2(300.0, 20.0), viewport, Vec2::ZERO));
        assert!(tooltip_for(&controller, &hit(6), false).is_none());
    }
}
