//! Wire models — serde structs matching the backend's JSON exactly.
//!
//! Field names follow the backend, which is not consistent with itself:
//! the reports endpoint (a Jackson-serialized JPA entity) emits camelCase,
//! while the balise endpoints (raw SQL rows) emit snake_case. Optionality
//! is deliberately generous on read paths — a missing or null field never
//! fails a whole list fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Reports ─────────────────────────────────────────────────────────

/// One raw device report as stored by the ingestion pipeline.
///
/// Display-only; `received_at` is kept as the backend's own timestamp
/// string and rendered verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub lock_code: Option<String>,
    #[serde(default)]
    pub command_type: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
    /// Raw payload as received from the device.
    #[serde(default)]
    pub report_data: String,
}

// ── Balises ─────────────────────────────────────────────────────────

/// Operational status reported by the backend.
///
/// The backend emits `ACTIVE` / `INACTIVE`; anything else (including a
/// missing field) degrades to `Unknown` rather than failing the fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum BaliseStatus {
    Active,
    Inactive,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BaliseStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// One tracked device. A read-only snapshot — the backend is the sole
/// writer; a stale copy is invalidated by the next reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balise {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub imei: String,
    #[serde(default)]
    pub status: BaliseStatus,
    /// Assigned customer name, if any. Empty string counts as unassigned.
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub battery_level: Option<u8>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Balise {
    /// Whether this balise already belongs to a customer.
    pub fn is_assigned(&self) -> bool {
        self.customer.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

// ── Stats ───────────────────────────────────────────────────────────

/// Aggregate counts for the dashboard. Absent keys default to zero,
/// matching what the original clients did with partial responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub cmacgm: u64,
    #[serde(default)]
    pub unassigned: u64,
}

// ── Assignment (write path) ─────────────────────────────────────────

/// CMA-CGM container metadata attached to an assignment.
///
/// camelCase on the wire — the partner integration reads these keys as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    pub equipment_reference: String,
    pub carrier_booking_reference: String,
    pub transport_order: String,
    pub mode_of_transport: String,
    pub partner_name: String,
    pub transportation_phase: String,
    pub location_code: String,
    pub location_name: String,
    pub facility_address: String,
    pub facility_city: String,
}

/// Body of `POST /api/balises/assign`.
///
/// `cmacgm_data` is omitted entirely (not serialized as `null`) unless the
/// distinguished customer was chosen — the backend keys its CMA-CGM path
/// on the field's presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentBody {
    pub balise_id: i64,
    pub customer: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmacgm_data: Option<ShipmentRecord>,
}

// ── Deserialization helpers ─────────────────────────────────────────

mod de {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    /// Accept the timestamp shapes the backend has been seen to emit:
    /// RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS` strings (Jackson's
    /// LocalDateTime default), epoch milliseconds, or null.
    pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        let Some(value) = raw else {
            return Ok(None);
        };

        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Number(n) => {
                let millis = n
                    .as_i64()
                    .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {n}")))?;
                match Utc.timestamp_millis_opt(millis) {
                    chrono::LocalResult::Single(dt) => Ok(Some(dt)),
                    _ => Err(D::Error::custom(format!("timestamp out of range: {millis}"))),
                }
            }
            serde_json::Value::String(s) => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
                    return Ok(Some(dt.with_timezone(&Utc)));
                }
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|naive| Some(naive.and_utc()))
                    .map_err(|e| D::Error::custom(format!("unrecognized timestamp {s:?}: {e}")))
            }
            other => Err(D::Error::custom(format!(
                "expected timestamp string or number, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn report_decodes_camel_case_with_missing_optionals() {
        let json = r#"{"id": 7, "reportData": "AA55..."}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.id, 7);
        assert_eq!(report.lock_code, None);
        assert_eq!(report.command_type, None);
        assert_eq!(report.received_at, None);
        assert_eq!(report.report_data, "AA55...");
    }

    #[test]
    fn balise_status_tolerates_unknown_strings() {
        let json = r#"{"id": 1, "name": "B-01", "imei": "86", "status": "MAINTENANCE"}"#;
        let balise: Balise = serde_json::from_str(json).unwrap();
        assert_eq!(balise.status, BaliseStatus::Unknown);
    }

    #[test]
    fn balise_last_seen_accepts_epoch_millis_and_iso_strings() {
        let millis: Balise =
            serde_json::from_str(r#"{"id": 1, "last_seen": 1735689600000}"#).unwrap();
        assert!(millis.last_seen.is_some());

        let naive: Balise =
            serde_json::from_str(r#"{"id": 2, "last_seen": "2025-01-01T00:00:00"}"#).unwrap();
        assert_eq!(millis.last_seen, naive.last_seen);

        let null: Balise = serde_json::from_str(r#"{"id": 3, "last_seen": null}"#).unwrap();
        assert_eq!(null.last_seen, None);
    }

    #[test]
    fn empty_customer_string_counts_as_unassigned() {
        let balise: Balise =
            serde_json::from_str(r#"{"id": 1, "customer": "  "}"#).unwrap();
        assert!(!balise.is_assigned());

        let assigned: Balise =
            serde_json::from_str(r#"{"id": 2, "customer": "DHL"}"#).unwrap();
        assert!(assigned.is_assigned());
    }

    #[test]
    fn stats_default_to_zero_for_absent_keys() {
        let stats: StatsSummary = serde_json::from_str(r#"{"total": 12}"#).unwrap();
        assert_eq!(stats.total, 12);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.cmacgm, 0);
        assert_eq!(stats.unassigned, 0);
    }

    #[test]
    fn assignment_body_omits_absent_cmacgm_data() {
        let body = AssignmentBody {
            balise_id: 42,
            customer: "DHL".into(),
            notes: String::new(),
            cmacgm_data: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("cmacgm_data").is_none());
    }

    #[test]
    fn shipment_record_serializes_camel_case() {
        let record = ShipmentRecord {
            equipment_reference: "APZU2106333".into(),
            carrier_booking_reference: "LHV3076333".into(),
            transport_order: String::new(),
            mode_of_transport: "TRUCK".into(),
            partner_name: "SINI TRANSPORT".into(),
            transportation_phase: "IMPORT".into(),
            location_code: "BAMAKO_DEPOT_01".into(),
            location_name: "Bamako Central Depot".into(),
            facility_address: "Avenue de la Nation, 123".into(),
            facility_city: "BAMAKO".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["equipmentReference"], "APZU2106333");
        assert_eq!(json["carrierBookingReference"], "LHV3076333");
        assert_eq!(json["modeOfTransport"], "TRUCK");
    }
}
