use egui::Color32;

use crate::services::booking::RoomStatus;
use crate::services::grid::BookingTone;
use crate::utils::date::DayKind;

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct GridPalette {
    pub cell_bg: Color32,
    pub saturday_bg: Color32,
    pub sunday_bg: Color32,
    pub blocked_bg: Color32,
    pub border: Color32,
    pub header_bg: Color32,
    pub label_bg: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub selection: Color32,
    pub hover_line: Color32,
    pub drop_target: Color32,
    pub occupied: Color32,
    pub pending: Color32,
    pub neutral: Color32,
}

impl GridPalette {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        let is_dark = visuals.dark_mode;
        let cell_bg = visuals.extreme_bg_color;
        let accent = visuals.selection.bg_fill;

        let (occupied, pending, neutral) = if is_dark {
            (
                Color32::from_rgb(46, 125, 80),
                Color32::from_rgb(170, 125, 40),
                Color32::from_rgb(90, 90, 96),
            )
        } else {
            (
                Color32::from_rgb(134, 214, 160),
                Color32::from_rgb(250, 210, 120),
                Color32::from_rgb(205, 205, 210),
            )
        };

        Self {
            cell_bg,
            saturday_bg: blend(cell_bg, visuals.widgets.inactive.bg_fill, 0.6),
            sunday_bg: blend(cell_bg, Color32::from_rgb(230, 80, 80), if is_dark { 0.18 } else { 0.1 }),
            blocked_bg: blend(cell_bg, neutral, 0.5),
            border: visuals.widgets.noninteractive.bg_stroke.color,
            header_bg: visuals.widgets.inactive.bg_fill,
            label_bg: visuals.faint_bg_color,
            text: visuals.text_color(),
            text_muted: visuals.weak_text_color(),
            selection: with_alpha(accent, if is_dark { 140 } else { 110 }),
            hover_line: with_alpha(accent, 200),
            drop_target: accent,
            occupied,
            pending,
            neutral,
        }
    }

    pub fn tone(&self, tone: BookingTone) -> Color32 {
        match tone {
            BookingTone::Occupied => self.occupied,
            BookingTone::Pending => self.pending,
            BookingTone::Neutral => self.neutral,
        }
    }

    pub fn day_bg(&self, kind: DayKind) -> Color32 {
        match kind {
            DayKind::Weekday => self.cell_bg,
            DayKind::Saturday => self.saturday_bg,
            DayKind::Sunday => self.sunday_bg,
        }
    }

    pub fn status(&self, status: RoomStatus) -> Color32 {
        match status {
            RoomStatus::Free => self.text_muted,
            RoomStatus::Reserved => self.pending,
            RoomStatus::Occupied => self.occupied,
        }
    }
}
