//! Network work off the UI thread. Results come back over a channel that the
//! app drains once per frame.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::models::booking::Booking;
use crate::services::booking::{
    ApiError, BookingApi, BookingService, BookingSnapshot, MoveError, MovePlan, MoveTicket,
};

/// A finished background job
pub enum TaskResult {
    /// Rooms and bookings fetched at startup or on reload
    Loaded(Result<BookingSnapshot, ApiError>),
    /// Server answer for the move dispatched under `ticket`
    Committed {
        ticket: MoveTicket,
        result: Result<Vec<Booking>, MoveError>,
    },
}

/// Spawns API calls on worker threads and collects their results.
///
/// Each job asks egui for a repaint when it finishes so `poll` runs promptly.
pub struct BackgroundTasks {
    api: Arc<dyn BookingApi>,
    tx: Sender<TaskResult>,
    rx: Receiver<TaskResult>,
    in_flight: usize,
}

impl BackgroundTasks {
    pub fn new(api: Arc<dyn BookingApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// True while any load or commit has not reported back
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Fetch rooms and bookings
    pub fn spawn_load(&mut self, ctx: &egui::Context) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            let result = BookingService::new(api.as_ref()).load();
            // receiver gone means the window closed; drop the result
            let _ = tx.send(TaskResult::Loaded(result));
            ctx.request_repaint();
        });
    }

    /// Commit a resolved plan; the result carries `ticket` back
    pub fn spawn_commit(&mut self, ticket: MoveTicket, plan: MovePlan, ctx: &egui::Context) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            let result = BookingService::new(api.as_ref()).commit(&plan);
            let _ = tx.send(TaskResult::Committed { ticket, result });
            ctx.request_repaint();
        });
    }

    /// Everything that finished since the last frame
    pub fn poll(&mut self) -> Vec<TaskResult> {
        let mut finished = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(result) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    finished.push(result);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        finished
    }
}
