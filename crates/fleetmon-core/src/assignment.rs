//! The balise-assignment workflow: draft → validate → request.
//!
//! Both clients collect the same inputs (a balise, a customer, optional
//! shipment metadata, free-text notes) and submit one POST. The rules are
//! concentrated here so the UIs only route keystrokes:
//!
//! - submission is enabled once a balise and a customer are chosen;
//! - choosing CMA-CGM additionally requires the two mandatory shipment
//!   fields before anything touches the network;
//! - the validated [`AssignmentRequest`] is a tagged type — only its
//!   CMA-CGM variant can carry shipment metadata, so a body with
//!   `cmacgm_data` for another customer is unrepresentable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fleetmon_api::{AssignmentBody, Balise, ShipmentRecord};

// ── Customer codes ──────────────────────────────────────────────────

/// The enumerated customer set offered by the assignment form.
///
/// `Cmacgm` is the distinguished code: it alone requires structured
/// shipment metadata and feeds the partner sync.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum CustomerCode {
    #[strum(to_string = "CMACGM", serialize = "CMA-CGM")]
    Cmacgm,
    #[strum(serialize = "DHL")]
    Dhl,
    #[strum(serialize = "MAERSK")]
    Maersk,
    #[strum(serialize = "OTHER")]
    Other,
}

impl CustomerCode {
    /// All codes in picker order.
    pub const ALL: [CustomerCode; 4] = [Self::Cmacgm, Self::Dhl, Self::Maersk, Self::Other];

    /// Human label as shown in pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cmacgm => "CMA-CGM",
            Self::Dhl => "DHL",
            Self::Maersk => "Maersk",
            Self::Other => "Other Customer",
        }
    }

    /// Wire value sent in the assignment body.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Cmacgm => "CMACGM",
            Self::Dhl => "DHL",
            Self::Maersk => "MAERSK",
            Self::Other => "OTHER",
        }
    }

    /// Whether this is the distinguished customer requiring shipment data.
    pub fn is_distinguished(self) -> bool {
        matches!(self, Self::Cmacgm)
    }
}

// ── Shipment sub-form ───────────────────────────────────────────────

/// Mode of transport for the CMA-CGM shipment leg.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum TransportMode {
    #[default]
    Truck,
    Rail,
    Barge,
    Vessel,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [Self::Truck, Self::Rail, Self::Barge, Self::Vessel];

    pub fn label(self) -> &'static str {
        match self {
            Self::Truck => "Truck",
            Self::Rail => "Rail",
            Self::Barge => "Barge",
            Self::Vessel => "Vessel",
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Truck => "TRUCK",
            Self::Rail => "RAIL",
            Self::Barge => "BARGE",
            Self::Vessel => "VESSEL",
        }
    }
}

/// Direction of the transportation phase.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum TransportPhase {
    #[default]
    Import,
    Export,
}

impl TransportPhase {
    pub const ALL: [TransportPhase; 2] = [Self::Import, Self::Export];

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Import => "IMPORT",
            Self::Export => "EXPORT",
        }
    }
}

/// The CMA-CGM container sub-form.
///
/// `equipment_reference` and `carrier_booking_reference` are the two
/// mandatory fields; everything else ships with the depot defaults the
/// field team actually uses, so a reset puts the form back into a
/// submit-in-two-fields state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDetails {
    pub equipment_reference: String,
    pub carrier_booking_reference: String,
    pub transport_order: String,
    pub mode_of_transport: TransportMode,
    pub partner_name: String,
    pub transportation_phase: TransportPhase,
    pub location_code: String,
    pub location_name: String,
    pub facility_address: String,
    pub facility_city: String,
}

impl Default for ShipmentDetails {
    fn default() -> Self {
        Self {
            equipment_reference: String::new(),
            carrier_booking_reference: String::new(),
            transport_order: String::new(),
            mode_of_transport: TransportMode::Truck,
            partner_name: "SINI TRANSPORT".into(),
            transportation_phase: TransportPhase::Import,
            location_code: "BAMAKO_DEPOT_01".into(),
            location_name: "Bamako Central Depot".into(),
            facility_address: "Avenue de la Nation, 123".into(),
            facility_city: "BAMAKO".into(),
        }
    }
}

impl ShipmentDetails {
    /// Both mandatory fields are non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.equipment_reference.trim().is_empty()
            && !self.carrier_booking_reference.trim().is_empty()
    }

    /// Convert to the wire record.
    fn to_record(&self) -> ShipmentRecord {
        ShipmentRecord {
            equipment_reference: self.equipment_reference.trim().to_owned(),
            carrier_booking_reference: self.carrier_booking_reference.trim().to_owned(),
            transport_order: self.transport_order.trim().to_owned(),
            mode_of_transport: self.mode_of_transport.as_wire().to_owned(),
            partner_name: self.partner_name.clone(),
            transportation_phase: self.transportation_phase.as_wire().to_owned(),
            location_code: self.location_code.clone(),
            location_name: self.location_name.clone(),
            facility_address: self.facility_address.clone(),
            facility_city: self.facility_city.clone(),
        }
    }
}

// ── Draft & validation ──────────────────────────────────────────────

/// Local validation failure — submission blocked, no request sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("select both a balise and a customer")]
    MissingSelection,
    #[error("equipment reference and carrier booking reference are required for CMA-CGM")]
    IncompleteShipment,
}

/// Transient form state for one assignment attempt.
///
/// Lives only while the form is open: discarded on cancel, reset to
/// defaults after a successful submission, left untouched after a
/// rejected one so the user can retry without re-entering anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentDraft {
    pub balise_id: Option<i64>,
    pub customer: Option<CustomerCode>,
    /// Only consulted when `customer` is the distinguished code.
    pub shipment: ShipmentDetails,
    pub notes: String,
}

impl AssignmentDraft {
    /// Whether the shipment sub-form should be visible.
    pub fn needs_shipment(&self) -> bool {
        self.customer.is_some_and(CustomerCode::is_distinguished)
    }

    /// Both pickers are set — the submit control may be enabled.
    /// (Shipment completeness is checked by [`validate`](Self::validate),
    /// not here, so the user gets the specific message on submit.)
    pub fn is_submittable(&self) -> bool {
        self.balise_id.is_some() && self.customer.is_some()
    }

    /// Synchronous local validation. `Ok` yields the request to submit;
    /// `Err` carries the message to show while staying in the form.
    pub fn validate(&self) -> Result<AssignmentRequest, DraftError> {
        let (Some(balise_id), Some(customer)) = (self.balise_id, self.customer) else {
            return Err(DraftError::MissingSelection);
        };

        let customer = if customer.is_distinguished() {
            if !self.shipment.is_complete() {
                return Err(DraftError::IncompleteShipment);
            }
            CustomerAssignment::Cmacgm(self.shipment.clone())
        } else {
            CustomerAssignment::Standard(customer)
        };

        Ok(AssignmentRequest {
            balise_id,
            customer,
            notes: self.notes.trim().to_owned(),
        })
    }

    /// Restore every field to its documented default, including the
    /// shipment sub-form defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Validated request ───────────────────────────────────────────────

/// Customer side of a validated assignment, keyed by the customer code.
///
/// The shipment payload exists only in the `Cmacgm` variant — there is no
/// way to attach it to any other customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerAssignment {
    Cmacgm(ShipmentDetails),
    Standard(CustomerCode),
}

impl CustomerAssignment {
    pub fn code(&self) -> CustomerCode {
        match self {
            Self::Cmacgm(_) => CustomerCode::Cmacgm,
            Self::Standard(code) => *code,
        }
    }
}

/// A validated assignment, ready to submit exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
    pub balise_id: i64,
    pub customer: CustomerAssignment,
    pub notes: String,
}

impl AssignmentRequest {
    /// Build the wire body. `cmacgm_data` is present iff the request is
    /// the distinguished variant.
    pub fn to_body(&self) -> AssignmentBody {
        let (customer, cmacgm_data) = match &self.customer {
            CustomerAssignment::Cmacgm(shipment) => {
                (CustomerCode::Cmacgm.as_wire().to_owned(), Some(shipment.to_record()))
            }
            CustomerAssignment::Standard(code) => (code.as_wire().to_owned(), None),
        };
        AssignmentBody {
            balise_id: self.balise_id,
            customer,
            notes: self.notes.clone(),
            cmacgm_data,
        }
    }
}

// ── Picker helpers ──────────────────────────────────────────────────

/// Balises eligible for assignment: everything without a customer.
pub fn unassigned_balises(balises: &[Balise]) -> Vec<&Balise> {
    balises.iter().filter(|b| !b.is_assigned()).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn cmacgm_draft() -> AssignmentDraft {
        AssignmentDraft {
            balise_id: Some(12),
            customer: Some(CustomerCode::Cmacgm),
            ..AssignmentDraft::default()
        }
    }

    #[test]
    fn submission_requires_both_selections() {
        let mut draft = AssignmentDraft::default();
        assert!(!draft.is_submittable());
        assert_eq!(draft.validate(), Err(DraftError::MissingSelection));

        draft.balise_id = Some(12);
        assert!(!draft.is_submittable());
        assert_eq!(draft.validate(), Err(DraftError::MissingSelection));

        draft.customer = Some(CustomerCode::Dhl);
        assert!(draft.is_submittable());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn cmacgm_requires_both_mandatory_shipment_fields() {
        let mut draft = cmacgm_draft();
        assert!(draft.needs_shipment());

        // Nothing filled in.
        assert_eq!(draft.validate(), Err(DraftError::IncompleteShipment));

        // Equipment reference alone is not enough.
        draft.shipment.equipment_reference = "APZU2106333".into();
        assert_eq!(draft.validate(), Err(DraftError::IncompleteShipment));

        // Whitespace does not count as filled.
        draft.shipment.carrier_booking_reference = "   ".into();
        assert_eq!(draft.validate(), Err(DraftError::IncompleteShipment));

        draft.shipment.carrier_booking_reference = "LHV3076333".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn other_customers_never_carry_shipment_data() {
        for code in [CustomerCode::Dhl, CustomerCode::Maersk, CustomerCode::Other] {
            let mut draft = cmacgm_draft();
            draft.customer = Some(code);
            // Leftover shipment edits from a previous CMA-CGM selection
            // must not leak into the body.
            draft.shipment.equipment_reference = "APZU2106333".into();
            draft.shipment.carrier_booking_reference = "LHV3076333".into();

            assert!(!draft.needs_shipment());
            let body = draft.validate().unwrap().to_body();
            assert_eq!(body.customer, code.as_wire());
            assert_eq!(body.cmacgm_data, None);

            let json = serde_json::to_value(&body).unwrap();
            assert!(json.get("cmacgm_data").is_none());
        }
    }

    #[test]
    fn cmacgm_body_carries_trimmed_shipment_record() {
        let mut draft = cmacgm_draft();
        draft.shipment.equipment_reference = " APZU2106333 ".into();
        draft.shipment.carrier_booking_reference = "LHV3076333".into();
        draft.notes = "  handle with care ".into();

        let body = draft.validate().unwrap().to_body();
        assert_eq!(body.balise_id, 12);
        assert_eq!(body.customer, "CMACGM");
        assert_eq!(body.notes, "handle with care");

        let record = body.cmacgm_data.unwrap();
        assert_eq!(record.equipment_reference, "APZU2106333");
        assert_eq!(record.mode_of_transport, "TRUCK");
        assert_eq!(record.transportation_phase, "IMPORT");
        assert_eq!(record.partner_name, "SINI TRANSPORT");
        assert_eq!(record.location_code, "BAMAKO_DEPOT_01");
    }

    #[test]
    fn reset_restores_every_documented_default() {
        let mut draft = cmacgm_draft();
        draft.shipment.equipment_reference = "APZU2106333".into();
        draft.shipment.carrier_booking_reference = "LHV3076333".into();
        draft.shipment.mode_of_transport = TransportMode::Vessel;
        draft.shipment.transportation_phase = TransportPhase::Export;
        draft.shipment.partner_name = "SOMEONE ELSE".into();
        draft.notes = "note".into();

        draft.reset();

        assert_eq!(draft, AssignmentDraft::default());
        // Spot-check the sub-form defaults the reset invariant names.
        assert_eq!(draft.shipment.equipment_reference, "");
        assert_eq!(draft.shipment.carrier_booking_reference, "");
        assert_eq!(draft.shipment.transport_order, "");
        assert_eq!(draft.shipment.mode_of_transport, TransportMode::Truck);
        assert_eq!(draft.shipment.partner_name, "SINI TRANSPORT");
        assert_eq!(draft.shipment.transportation_phase, TransportPhase::Import);
        assert_eq!(draft.shipment.location_code, "BAMAKO_DEPOT_01");
        assert_eq!(draft.shipment.location_name, "Bamako Central Depot");
        assert_eq!(draft.shipment.facility_address, "Avenue de la Nation, 123");
        assert_eq!(draft.shipment.facility_city, "BAMAKO");
    }

    #[test]
    fn picker_excludes_assigned_balises() {
        let balises: Vec<Balise> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "A", "imei": "1", "customer": "DHL"},
            {"id": 2, "name": "B", "imei": "2", "customer": null},
            {"id": 3, "name": "C", "imei": "3", "customer": ""},
            {"id": 4, "name": "D", "imei": "4", "customer": "CMA-CGM"}
        ]))
        .unwrap();

        let selectable = unassigned_balises(&balises);
        let ids: Vec<i64> = selectable.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn empty_inventory_yields_empty_picker() {
        assert!(unassigned_balises(&[]).is_empty());
    }

    #[test]
    fn customer_code_parses_wire_and_human_forms() {
        assert_eq!("CMACGM".parse::<CustomerCode>().unwrap(), CustomerCode::Cmacgm);
        assert_eq!("cma-cgm".parse::<CustomerCode>().unwrap(), CustomerCode::Cmacgm);
        assert_eq!("maersk".parse::<CustomerCode>().unwrap(), CustomerCode::Maersk);
        assert!("EVERGREEN".parse::<CustomerCode>().is_err());
    }
}
