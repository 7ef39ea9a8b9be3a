use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use service::appointment::domain::NewAppointment;
use service::appointment::repository::mock::MockAppointmentRepository;
use service::appointment::{AppointmentService, FixedClock};

fn slot(day: u32, minute: u32) -> NewAppointment {
    let base = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap() + Duration::days(i64::from(day));
    NewAppointment {
        date: Some(base),
        time: NaiveTime::from_hms_opt(8 + minute / 60, minute % 60, 0),
        client_id: Some(1),
        barber_id: Some(1),
        service_id: Some(1),
    }
}

fn bench_booking(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let clock = FixedClock::at(NaiveDate::from_ymd_opt(2029, 12, 31).unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());

    let repo = Arc::new(MockAppointmentRepository::seeded(&[1], &[1], &[1]));
    let svc = AppointmentService::with_clock(repo, Arc::new(clock));
    let mut n: u32 = 0;
    c.bench_function("appointment_book_free_slot", |b| {
        b.iter(|| {
            // one slot per minute, 8:00-17:59, then roll to the next day
            let (day, minute) = (n / 600, n % 600);
            n += 1;
            rt.block_on(svc.create(slot(day, minute))).unwrap();
        });
    });

    let repo = Arc::new(MockAppointmentRepository::seeded(&[1], &[1], &[1]));
    let svc = AppointmentService::with_clock(repo, Arc::new(clock));
    rt.block_on(svc.create(slot(0, 0))).unwrap();
    c.bench_function("appointment_reject_conflict", |b| {
        b.iter(|| {
            assert!(rt.block_on(svc.create(slot(0, 0))).is_err());
        });
    });
}

criterion_group!(benches, bench_booking);
criterion_main!(benches);
