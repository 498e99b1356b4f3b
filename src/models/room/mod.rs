// Room module
// Rooms are keyed by their room number, not by the numeric id

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Room {
    pub fn new(id: i64, room_number: impl Into<String>, room_type: impl Into<String>) -> Self {
        Self {
            id,
            room_number: room_number.into(),
            capacity: 2,
            room_type: room_type.into(),
            description: None,
        }
    }

    /// Row header text, e.g. "101 · Double"
    pub fn label(&self) -> String {
        if self.room_type.is_empty() {
            self.room_number.clone()
        } else {
            format!("{} · {}", self.room_number, self.room_type)
        }
    }
}

/// Numeric room numbers first (ascending), then the rest lexicographically.
pub fn compare_room_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Rooms in grid row order, capped at `max_rooms`
pub fn order_rooms(rooms: &[Room], max_rooms: usize) -> Vec<Room> {
    let mut ordered = rooms.to_vec();
    ordered.sort_by(|a, b| compare_room_numbers(&a.room_number, &b.room_number));
    ordered.truncate(max_rooms);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_rooms_numeric_first() {
        let rooms = vec![
            Room::new(1, "Suite B", "Suite"),
            Room::new(2, "12", "Double"),
            Room::new(3, "3", "Single"),
            Room::new(4, "Suite A", "Suite"),
            Room::new(5, "101", "Double"),
        ];

        let ordered: Vec<String> = order_rooms(&rooms, 10)
            .into_iter()
            .map(|room| room.room_number)
            .collect();

        assert_eq!(ordered, vec!["3", "12", "101", "Suite A", "Suite B"]);
    }

    #[test]
    fn test_order_rooms_truncates() {
        let rooms: Vec<Room> = (1..=5)
            .map(|n| Room::new(n, n.to_string(), "Double"))
            .collect();
        assert_eq!(order_rooms(&rooms, 3).len(), 3);
    }

    #[test]
    fn test_label() {
        assert_eq!(Room::new(1, "101", "Double").label(), "101 · Double");
        assert_eq!(Room::new(1, "101", "").label(), "101");
    }
}
