//! Toasts for move/load feedback: conflicts, committed moves, API failures.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

const FADE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }

    /// Errors stay up long enough to read the server message
    pub fn default_duration(&self) -> Duration {
        match self {
            ToastLevel::Error => Duration::from_secs(6),
            ToastLevel::Warning => Duration::from_secs(4),
            ToastLevel::Success | ToastLevel::Info => Duration::from_secs(3),
        }
    }

    fn colors(&self, is_dark: bool) -> (Color32, Color32) {
        match (self, is_dark) {
            (ToastLevel::Success, true) => (Color32::from_rgb(30, 70, 40), Color32::from_rgb(100, 220, 120)),
            (ToastLevel::Info, true) => (Color32::from_rgb(30, 50, 80), Color32::from_rgb(100, 180, 255)),
            (ToastLevel::Warning, true) => (Color32::from_rgb(80, 60, 20), Color32::from_rgb(255, 200, 80)),
            (ToastLevel::Error, true) => (Color32::from_rgb(80, 30, 30), Color32::from_rgb(255, 120, 120)),
            (ToastLevel::Success, false) => (Color32::from_rgb(220, 255, 220), Color32::from_rgb(30, 120, 50)),
            (ToastLevel::Info, false) => (Color32::from_rgb(220, 235, 255), Color32::from_rgb(30, 80, 150)),
            (ToastLevel::Warning, false) => (Color32::from_rgb(255, 245, 200), Color32::from_rgb(150, 100, 0)),
            (ToastLevel::Error, false) => (Color32::from_rgb(255, 220, 220), Color32::from_rgb(180, 40, 40)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: level.default_duration(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// 1.0 until the last half second, then linear fade
    pub fn opacity(&self) -> f32 {
        let remaining = self.duration.saturating_sub(self.created_at.elapsed());
        if remaining >= FADE {
            1.0
        } else {
            (remaining.as_secs_f32() / FADE.as_secs_f32()).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Info));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Error));
    }

    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Stack toasts upward from the bottom-right corner
    pub fn render(&mut self, ctx: &Context) {
        self.cleanup();
        if self.toasts.is_empty() {
            return;
        }
        ctx.request_repaint();

        let is_dark = ctx.style().visuals.dark_mode;
        let screen_rect = ctx.screen_rect();
        let toast_width = 340.0;
        let toast_height = 40.0;
        let margin = 10.0;
        let spacing = 5.0;

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = i as f32 * (toast_height + spacing);
            let pos = Pos2::new(
                screen_rect.right() - toast_width - margin,
                screen_rect.bottom() - toast_height - margin - y_offset,
            );
            let (bg, fg) = toast.level.colors(is_dark);
            let bg = bg.gamma_multiply(0.9 * opacity);
            let fg = fg.gamma_multiply(opacity);

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(bg)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, fg.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_max_width(toast_width - 24.0);
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(fg).strong());
                                ui.label(RichText::new(&toast.message).color(fg));
                            });
                        });
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toasts_last_longer() {
        let error = Toast::new("Swap failed", ToastLevel::Error);
        let info = Toast::new("Loaded", ToastLevel::Info);
        assert!(error.duration > info.duration);
        assert_eq!(error.opacity(), 1.0);
    }

    #[test]
    fn test_expired_toasts_are_removed() {
        let mut manager = ToastManager::new();
        let mut stale = Toast::new("old", ToastLevel::Info);
        stale.duration = Duration::ZERO;
        manager.add(stale);
        manager.success("fresh");
        manager.cleanup();
        assert_eq!(manager.len(), 1);
    }
}
