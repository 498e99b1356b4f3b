mod tasks;
mod toast;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use egui::{Color32, RichText};

use self::tasks::{BackgroundTasks, TaskResult};
use self::toast::ToastManager;
use crate::models::booking::Booking;
use crate::models::settings::GridSettings;
use crate::services::booking::{
    active_booking_map, first_available_date, status_board, BookingApi, MoveError, MovePlan, MoveTicket,
    PendingMoves,
};
use crate::services::grid::{GridAction, GridController, VisibleWindow};
use crate::ui_egui::views::booking_grid::BookingGridView;
use crate::ui_egui::views::palette::GridPalette;
use crate::utils::date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    Rooms,
    Calendar,
}

/// The booking grid window: month calendar, room status board, booking
/// details and the background loads and commits behind them.
pub struct BookingGridApp {
    controller: GridController,
    grid_view: BookingGridView,
    tasks: BackgroundTasks,
    pending: PendingMoves,
    toasts: ToastManager,
    view: AppView,
    reference_date: NaiveDate,
    details: Option<Booking>,
    context_menu: Option<(Booking, egui::Pos2)>,
    loaded: bool,
}

impl BookingGridApp {
    /// Open on the month of `settings.initial_month` (today when unset) and
    /// start the first load.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: GridSettings, api: Arc<dyn BookingApi>) -> Self {
        let today = Local::now().date_naive();
        let anchor = match settings.initial_month.as_deref().map(date::parse_month_anchor) {
            Some(Ok(anchor)) => anchor,
            Some(Err(e)) => {
                log::warn!("Ignoring initial_month: {}", e);
                today
            }
            None => today,
        };
        let window = VisibleWindow::from_anchor(anchor, settings.window_days);

        let mut tasks = BackgroundTasks::new(api);
        tasks.spawn_load(&cc.egui_ctx);

        Self {
            controller: GridController::new(settings, window),
            grid_view: BookingGridView::new(),
            tasks,
            pending: PendingMoves::new(),
            toasts: ToastManager::new(),
            view: AppView::Calendar,
            reference_date: today,
            details: None,
            context_menu: None,
            loaded: false,
        }
    }

    fn poll_tasks(&mut self, ctx: &egui::Context) {
        for finished in self.tasks.poll() {
            match finished {
                TaskResult::Loaded(Ok(snapshot)) => {
                    self.controller.set_data(&snapshot.rooms, snapshot.bookings);
                    self.loaded = true;
                }
                TaskResult::Loaded(Err(e)) => {
                    log::error!("Failed to load rooms and bookings: {}", e);
                    self.toasts.error(format!("Could not load bookings: {}", e));
                }
                TaskResult::Committed { ticket, result } => self.handle_commit(ctx, ticket, result),
            }
        }
    }

    fn handle_commit(&mut self, ctx: &egui::Context, ticket: MoveTicket, result: Result<Vec<Booking>, MoveError>) {
        let mut bookings = self.controller.bookings().to_vec();
        let settled = self.pending.settle(ticket, result, &mut bookings);
        self.controller.set_bookings(bookings);

        match settled {
            Ok(MovePlan::Swap { booking, swap, .. }) => self
                .toasts
                .success(format!("Swapped rooms of {} and {}", booking.surname(), swap.surname())),
            Ok(MovePlan::Plain { booking, target_room }) => self
                .toasts
                .success(format!("Moved {} to room {}", booking.surname(), target_room)),
            Ok(MovePlan::Unchanged) => {}
            Err(err) => {
                self.toasts.error(err.to_string());
                if err.needs_reload() {
                    self.tasks.spawn_load(ctx);
                }
            }
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: GridAction) {
        match action {
            GridAction::RangeSelected {
                room_number,
                start_date,
                end_date,
            } => {
                log::info!("Range selected in room {}: {} -> {}", room_number, start_date, end_date);
                self.toasts.info(format!(
                    "New stay in room {}: {} → {}",
                    room_number,
                    date::to_ymd(start_date),
                    date::to_ymd(end_date)
                ));
            }
            GridAction::BookingSelected(booking) => {
                self.context_menu = None;
                self.details = Some(booking);
            }
            GridAction::BookingMoved { booking, target_room } => {
                match self.pending.resolve(self.controller.bookings(), &booking, &target_room) {
                    Ok(Some((ticket, plan))) => self.tasks.spawn_commit(ticket, plan, ctx),
                    Ok(None) => {}
                    Err(conflict) => {
                        log::warn!("Move of booking {} rejected: {}", booking.id, conflict);
                        self.toasts.warning(conflict.to_string());
                    }
                }
            }
            GridAction::BookingContextMenu { booking, x, y } => {
                self.context_menu = Some((booking, egui::pos2(x, y)));
            }
            GridAction::Back => {
                self.view = AppView::Rooms;
            }
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            match self.view {
                AppView::Calendar => {
                    if ui.button("← Rooms").clicked() {
                        let action = self.controller.back();
                        self.handle_action(ctx, action);
                    }
                    ui.separator();
                    if ui.button("◀").on_hover_text("Previous month").clicked() {
                        self.controller.previous_month();
                    }
                    ui.label(RichText::new(self.controller.window().label()).strong().size(16.0));
                    if ui.button("▶").on_hover_text("Next month").clicked() {
                        self.controller.next_month();
                    }
                    if ui.button("Today").clicked() {
                        let days = self.controller.settings().window_days;
                        let today = Local::now().date_naive();
                        self.controller
                            .set_window(VisibleWindow::from_anchor(today, days));
                    }
                }
                AppView::Rooms => {
                    if ui.button("Calendar →").clicked() {
                        self.view = AppView::Calendar;
                    }
                    ui.separator();
                    if ui.button("◀").clicked() {
                        self.reference_date = date::add_days(self.reference_date, -1);
                    }
                    ui.label(RichText::new(date::to_ymd(self.reference_date)).strong().size(16.0));
                    if ui.button("▶").clicked() {
                        self.reference_date = date::add_days(self.reference_date, 1);
                    }
                }
            }

            ui.separator();
            if ui.button("⟳ Reload").clicked() {
                self.tasks.spawn_load(ctx);
            }
            if self.tasks.is_busy() {
                ui.spinner();
            }
        });
    }

    fn rooms_board(&mut self, ui: &mut egui::Ui) {
        let palette = GridPalette::from_visuals(ui.visuals());
        let bookings = self.controller.bookings();
        let board = status_board(self.controller.rooms(), bookings, self.reference_date);
        let active = active_booking_map(bookings, self.reference_date);
        let mut open = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (room, status) in &board {
                    let status = *status;
                    egui::Frame::group(ui.style())
                        .stroke(egui::Stroke::new(1.5, palette.status(status)))
                        .show(ui, |ui| {
                            ui.set_width(170.0);
                            ui.vertical(|ui| {
                                ui.label(RichText::new(room.label()).strong());
                                ui.label(RichText::new(status.label()).color(palette.status(status)));
                                match active.get(&room.room_number) {
                                    Some(booking) => {
                                        if ui.link(booking.guest_label()).clicked() {
                                            open = Some(booking.clone());
                                        }
                                    }
                                    None => {
                                        ui.label(RichText::new("-").color(palette.text_muted));
                                    }
                                }
                                let next = first_available_date(bookings, &room.room_number, self.reference_date);
                                ui.small(format!("Free from {}", date::to_ymd(next)));
                            });
                        });
                }
            });
        });

        if open.is_some() {
            self.details = open;
        }
    }

    fn details_window(&mut self, ctx: &egui::Context) {
        let Some(booking) = self.details.clone() else {
            return;
        };
        let mut open = true;
        egui::Window::new(format!("Booking #{}", booking.id))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("booking_details").num_columns(2).show(ui, |ui| {
                    ui.label("Guest");
                    ui.label(booking.guest_label());
                    ui.end_row();
                    ui.label("Room");
                    ui.label(booking.room_number.as_str());
                    ui.end_row();
                    ui.label("Stay");
                    ui.label(format!(
                        "{} → {} ({} nights)",
                        date::to_ymd(booking.check_in_date),
                        date::to_ymd(booking.check_out_date),
                        booking.nights()
                    ));
                    ui.end_row();
                    ui.label("Party");
                    ui.label(format!(
                        "{} adults, {} children, {} infants",
                        booking.adults, booking.children, booking.infants
                    ));
                    ui.end_row();
                    ui.label("Treatment");
                    ui.label(booking.treatment.label());
                    ui.end_row();
                    ui.label("Status");
                    ui.label(format!("{:?}", booking.status));
                    ui.end_row();
                    if let Some(price) = booking.price {
                        ui.label("Price");
                        ui.label(format!("{:.2}", price));
                        ui.end_row();
                    }
                    if let Some(notes) = booking.notes.as_deref().filter(|n| !n.is_empty()) {
                        ui.label("Notes");
                        ui.label(notes);
                        ui.end_row();
                    }
                });
            });
        if !open {
            self.details = None;
        }
    }

    fn context_menu_popup(&mut self, ctx: &egui::Context) {
        let Some((booking, pos)) = self.context_menu.clone() else {
            return;
        };
        let mut close = false;
        let area = egui::Area::new(egui::Id::new("booking_context_menu"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new(booking.guest_label()).strong());
                    if ui.button("Open details").clicked() {
                        self.details = Some(booking.clone());
                        close = true;
                    }
                    if ui.button(RichText::new("Close").color(Color32::GRAY)).clicked() {
                        close = true;
                    }
                });
            });

        let clicked_elsewhere = ctx.input(|i| i.pointer.any_pressed())
            && ctx
                .pointer_interact_pos()
                .is_some_and(|p| !area.response.rect.contains(p));
        if close || clicked_elsewhere {
            self.context_menu = None;
        }
    }
}

impl eframe::App for BookingGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks(ctx);

        egui::TopBottomPanel::top("booking_grid_toolbar").show(ctx, |ui| {
            self.top_bar(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.loaded && self.tasks.is_busy() {
                ui.centered_and_justified(|ui| ui.spinner());
                return;
            }
            match self.view {
                AppView::Calendar => {
                    self.grid_view.set_menu_open(self.context_menu.is_some());
                    if let Some(action) = self.grid_view.show(ui, &mut self.controller) {
                        self.handle_action(ctx, action);
                    }
                }
                AppView::Rooms => self.rooms_board(ui),
            }
        });

        self.context_menu_popup(ctx);
        self.details_window(ctx);
        self.toasts.render(ctx);
    }
}
