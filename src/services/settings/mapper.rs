use crate::models::settings::GridSettings;

pub const ENV_API_URL: &str = "BOOKING_GRID_API_URL";
pub const ENV_TOKEN: &str = "BOOKING_GRID_TOKEN";

/// Overlay environment values on file settings. `lookup` is `std::env::var` in
/// production; tests pass a closure.
pub fn apply_env_overrides<F>(settings: &mut GridSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        log::info!("Using API URL from {}", ENV_API_URL);
        settings.api_base_url = url.trim().to_string();
    }

    if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
        settings.auth_token = Some(token.trim().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied() {
        let mut settings = GridSettings::default();
        apply_env_overrides(&mut settings, |key| match key {
            ENV_API_URL => Some("https://hotel.example.com ".to_string()),
            ENV_TOKEN => Some("secret".to_string()),
            _ => None,
        });
        assert_eq!(settings.api_base_url, "https://hotel.example.com");
        assert_eq!(settings.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_values_ignored() {
        let mut settings = GridSettings::default();
        apply_env_overrides(&mut settings, |_| Some("  ".to_string()));
        assert_eq!(settings, GridSettings::default());
    }
}
