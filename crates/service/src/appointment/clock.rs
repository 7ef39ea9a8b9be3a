use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of "now" for the temporal booking rule.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate { self.now().date() }

    fn time_of_day(&self) -> NaiveTime { self.now().time() }
}

/// Wall clock of the server, in its local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime { Local::now().naive_local() }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self { Self(date.and_time(time)) }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime { self.0 }
}
