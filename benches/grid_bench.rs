// Benchmark for the booking grid
// Measures index build and per-room row layout for growing hotels

use booking_grid::models::booking::{Booking, BookingStatus};
use booking_grid::models::room::Room;
use booking_grid::services::grid::{BookingIndex, RowLayout, VisibleWindow};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn hotel(room_count: usize) -> (Vec<Room>, Vec<Booking>) {
    let rooms: Vec<Room> = (0..room_count)
        .map(|i| Room::new(i as i64, format!("{}", 100 + i), "Double"))
        .collect();

    let start = NaiveDate::from_ymd_opt(2024, 5, 25).unwrap();
    let mut bookings = Vec::new();
    let mut id = 0;
    for (r, room) in rooms.iter().enumerate() {
        // back-to-back stays of varying length, staggered per room
        let mut check_in = start + Duration::days((r % 4) as i64);
        for n in 0..8 {
            let nights = 2 + ((r + n) % 5) as i64;
            let check_out = check_in + Duration::days(nights);
            id += 1;
            bookings.push(
                Booking::new(id, room.room_number.clone(), check_in, check_out)
                    .with_status(BookingStatus::Confirmed)
                    .with_guest(format!("Guest Surname{}", id)),
            );
            check_in = check_out;
        }
    }
    (rooms, bookings)
}

fn bench_index_build(c: &mut Criterion) {
    let window = VisibleWindow::month(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    let mut group = c.benchmark_group("index_build");

    for room_count in [20, 80, 200] {
        let (rooms, bookings) = hotel(room_count);
        group.bench_with_input(BenchmarkId::from_parameter(room_count), &room_count, |b, _| {
            b.iter(|| BookingIndex::build(black_box(&rooms), black_box(&bookings), &window))
        });
    }

    group.finish();
}

fn bench_row_layout(c: &mut Criterion) {
    let window = VisibleWindow::month(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    let mut group = c.benchmark_group("row_layout");

    for room_count in [20, 80, 200] {
        let (rooms, bookings) = hotel(room_count);
        let index = BookingIndex::build(&rooms, &bookings, &window);
        group.bench_with_input(BenchmarkId::from_parameter(room_count), &room_count, |b, _| {
            b.iter(|| {
                rooms
                    .iter()
                    .map(|room| RowLayout::build(black_box(&room.room_number), &index, &window))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_row_layout);
criterion_main!(benches);
