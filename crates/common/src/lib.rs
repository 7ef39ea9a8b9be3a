//! Pieces shared by every crate in the workspace: logging bootstrap,
//! wire-level response types and serde helpers for partial updates.

pub mod types;
pub mod utils;
pub mod serde_helpers;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn ack_ok_and_rejected() {
        let ok = types::Ack::ok("Appointment booked.");
        assert!(ok.success);
        assert_eq!(ok.message, "Appointment booked.");

        let rejected = types::Ack::rejected("slot taken");
        assert!(!rejected.success);
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "slot taken"}));
    }
}
