use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub client_id: i32,
    pub barber_id: i32,
    pub service_id: i32,
}

impl From<models::appointment::Model> for Appointment {
    fn from(m: models::appointment::Model) -> Self {
        Self { id: m.id, date: m.date, time: m.time, client_id: m.client_id, barber_id: m.barber_id, service_id: m.service_id }
    }
}

/// Booking request as it arrives; every field is checked for presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAppointment {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "common::serde_helpers::opt_time")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub client_id: Option<i32>,
    #[serde(default)]
    pub barber_id: Option<i32>,
    #[serde(default)]
    pub service_id: Option<i32>,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentPatch {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "common::serde_helpers::opt_time")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub client_id: Option<i32>,
    #[serde(default)]
    pub barber_id: Option<i32>,
    #[serde(default)]
    pub service_id: Option<i32>,
}

impl AppointmentPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.client_id.is_none() && self.barber_id.is_none() && self.service_id.is_none()
    }
}

/// A fully validated booking, ready to be stored under a fresh id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub client_id: i32,
    pub barber_id: i32,
    pub service_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_appointment_accepts_short_time() {
        let n: NewAppointment = serde_json::from_str(
            r#"{"date":"2030-01-02","time":"10:00","client_id":1,"barber_id":2,"service_id":3}"#,
        )
        .unwrap();
        assert_eq!(n.time, NaiveTime::from_hms_opt(10, 0, 0));
        assert_eq!(n.barber_id, Some(2));
    }

    #[test]
    fn missing_fields_stay_absent() {
        let n: NewAppointment = serde_json::from_str(r#"{"client_id":1}"#).unwrap();
        assert!(n.date.is_none() && n.time.is_none() && n.service_id.is_none());
        let p: AppointmentPatch = serde_json::from_str("{}").unwrap();
        assert!(p.is_empty());
    }
}
