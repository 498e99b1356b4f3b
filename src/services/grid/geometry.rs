//! Coordinate projection for the grid: what room row and day column lie under
//! a point, and where a given cell is drawn. Positions are in the grid's own
//! content space (scroll offsets already removed).

use egui::{Pos2, Rect, Vec2};

use super::layout::CellHalf;
use crate::models::settings::GridSettings;

/// A cell under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridHit {
    pub row: usize,
    pub room_number: String,
    pub column: usize,
    pub half: CellHalf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    pub origin: Pos2,
    pub room_label_width: f32,
    pub column_width: f32,
    pub row_height: f32,
    pub header_height: f32,
    pub columns: usize,
    rooms: Vec<String>,
}

impl GridGeometry {
    pub fn new(settings: &GridSettings, origin: Pos2, rooms: Vec<String>, columns: usize) -> Self {
        Self {
            origin,
            room_label_width: settings.room_label_width,
            column_width: settings.column_width,
            row_height: settings.row_height,
            header_height: settings.header_height,
            columns,
            rooms,
        }
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Full size of the scrollable grid, header and label column included
    pub fn content_size(&self) -> Vec2 {
        Vec2::new(
            self.room_label_width + self.columns as f32 * self.column_width,
            self.header_height + self.rooms.len() as f32 * self.row_height,
        )
    }

    pub fn days_left(&self) -> f32 {
        self.origin.x + self.room_label_width
    }

    pub fn rows_top(&self) -> f32 {
        self.origin.y + self.header_height
    }

    /// Row under `y`, ignoring the header
    pub fn row_of(&self, y: f32) -> Option<usize> {
        let offset = y - self.rows_top();
        if offset < 0.0 {
            return None;
        }
        let row = (offset / self.row_height) as usize;
        (row < self.rooms.len()).then_some(row)
    }

    /// Day column under `x`, ignoring the room label column
    pub fn column_of(&self, x: f32) -> Option<usize> {
        let offset = x - self.days_left();
        if offset < 0.0 {
            return None;
        }
        let column = (offset / self.column_width) as usize;
        (column < self.columns).then_some(column)
    }

    /// Room of the row under `pos`; the label column counts as part of the row
    pub fn room_at(&self, pos: Pos2) -> Option<&str> {
        if pos.x < self.origin.x || pos.x > self.origin.x + self.content_size().x {
            return None;
        }
        self.row_of(pos.y)
            .and_then(|row| self.rooms.get(row))
            .map(String::as_str)
    }

    pub fn hit_test(&self, pos: Pos2) -> Option<GridHit> {
        let row = self.row_of(pos.y)?;
        let column = self.column_of(pos.x)?;
        let room_number = self.rooms.get(row)?.clone();
        let half = if pos.x < self.column_center_x(column) {
            CellHalf::Left
        } else {
            CellHalf::Right
        };
        Some(GridHit {
            row,
            room_number,
            column,
            half,
        })
    }

    pub fn column_center_x(&self, column: usize) -> f32 {
        self.days_left() + (column as f32 + 0.5) * self.column_width
    }

    /// Rect covering `count` columns of `row`, starting at `first_column`
    pub fn span_rect(&self, row: usize, first_column: usize, count: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                self.days_left() + first_column as f32 * self.column_width,
                self.rows_top() + row as f32 * self.row_height,
            ),
            Vec2::new(count as f32 * self.column_width, self.row_height),
        )
    }

    pub fn cell_rect(&self, row: usize, column: usize) -> Rect {
        self.span_rect(row, column, 1)
    }

    pub fn label_rect(&self, row: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.origin.x, self.rows_top() + row as f32 * self.row_height),
            Vec2::new(self.room_label_width, self.row_height),
        )
    }

    pub fn header_rect(&self, column: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                self.days_left() + column as f32 * self.column_width,
                self.origin.y,
            ),
            Vec2::new(self.column_width, self.header_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn geometry() -> GridGeometry {
        // label 180, columns 44, rows 24, header 36
        GridGeometry::new(
            &GridSettings::default(),
            Pos2::ZERO,
            vec!["101".into(), "102".into(), "201".into()],
            30,
        )
    }

    #[test]
    fn test_hit_test_cell() {
        let hit = geometry().hit_test(pos2(180.0 + 44.0 * 2.0 + 10.0, 36.0 + 24.0 + 5.0)).unwrap();
        assert_eq!(hit.room_number, "102");
        assert_eq!(hit.row, 1);
        assert_eq!(hit.column, 2);
        assert_eq!(hit.half, CellHalf::Left);

        let right = geometry().hit_test(pos2(180.0 + 44.0 * 2.0 + 30.0, 40.0)).unwrap();
        assert_eq!(right.half, CellHalf::Right);
        assert_eq!(right.room_number, "101");
    }

    #[test]
    fn test_hit_test_outside() {
        let geometry = geometry();
        assert!(geometry.hit_test(pos2(100.0, 50.0)).is_none(), "label column");
        assert!(geometry.hit_test(pos2(300.0, 10.0)).is_none(), "header");
        assert!(geometry.hit_test(pos2(300.0, 36.0 + 24.0 * 3.0 + 1.0)).is_none(), "below last row");
        assert!(geometry.hit_test(pos2(180.0 + 44.0 * 30.0 + 1.0, 50.0)).is_none(), "past last day");
    }

    #[test]
    fn test_room_at_includes_label_column() {
        assert_eq!(geometry().room_at(pos2(20.0, 36.0 + 24.0 * 2.0 + 1.0)), Some("201"));
        assert_eq!(geometry().room_at(pos2(20.0, 5.0)), None);
    }

    #[test]
    fn test_cell_rect_roundtrips_through_hit_test() {
        let geometry = geometry();
        let rect = geometry.cell_rect(2, 17);
        let hit = geometry.hit_test(rect.center()).unwrap();
        assert_eq!((hit.row, hit.column), (2, 17));
        assert_eq!(geometry.column_center_x(17), rect.center().x);
    }

    #[test]
    fn test_content_size() {
        assert_eq!(geometry().content_size(), Vec2::new(180.0 + 44.0 * 30.0, 36.0 + 72.0));
    }
}
