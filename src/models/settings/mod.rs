// Settings module
// Runtime configuration for the booking grid

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Base URL of the booking REST API
    pub api_base_url: String,
    /// Bearer token sent with every request
    pub auth_token: Option<String>,
    /// Visible window length; `None` or `Some(0)` shows the whole calendar month
    pub window_days: Option<usize>,
    /// Initial month as "YYYY-MM"; defaults to the current month
    pub initial_month: Option<String>,
    pub row_height: f32,
    pub column_width: f32,
    pub room_label_width: f32,
    pub header_height: f32,
    /// Manhattan distance in points before a press becomes a drag
    pub drag_threshold: f32,
    /// Distance from the viewport edge that triggers auto-scroll
    pub autoscroll_edge: f32,
    /// Points scrolled per pointer move while auto-scrolling
    pub autoscroll_speed: f32,
    pub ghost_width: f32,
    pub max_rooms: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            window_days: Some(30),
            initial_month: None,
            row_height: 24.0,
            column_width: 44.0,
            room_label_width: 180.0,
            header_height: 36.0,
            drag_threshold: 4.0,
            autoscroll_edge: 40.0,
            autoscroll_speed: 18.0,
            ghost_width: 160.0,
            max_rooms: 80,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.trim().is_empty() {
            return Err("API base URL cannot be empty".to_string());
        }

        let geometry = [
            ("row_height", self.row_height),
            ("column_width", self.column_width),
            ("room_label_width", self.room_label_width),
            ("header_height", self.header_height),
            ("ghost_width", self.ghost_width),
        ];
        for (name, value) in geometry {
            if !(value > 0.0) {
                return Err(format!("{} must be positive", name));
            }
        }

        if self.drag_threshold < 0.0 || self.autoscroll_edge < 0.0 || self.autoscroll_speed < 0.0 {
            return Err("Drag threshold and auto-scroll values cannot be negative".to_string());
        }

        if self.max_rooms == 0 {
            return Err("max_rooms must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GridSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_row_height() {
        let settings = GridSettings {
            row_height: 0.0,
            ..GridSettings::default()
        };
        assert_eq!(
            settings.validate().unwrap_err(),
            "row_height must be positive"
        );
    }

    #[test]
    fn test_rejects_zero_max_rooms() {
        let settings = GridSettings {
            max_rooms: 0,
            ..GridSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: GridSettings = toml::from_str("window_days = 14\nrow_height = 30.0\n").unwrap();
        assert_eq!(settings.window_days, Some(14));
        assert_eq!(settings.row_height, 30.0);
        assert_eq!(settings.column_width, 44.0);
        assert_eq!(settings.api_base_url, "http://localhost:8080");
    }
}
