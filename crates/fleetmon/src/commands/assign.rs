//! Non-interactive assignment — the CLI face of the assignment workflow.
//!
//! Flags populate an [`AssignmentDraft`]; local validation runs BEFORE a
//! client is even built, so a missing CMA-CGM field fails fast with exit
//! code 2 and provably no network traffic.

use owo_colors::OwoColorize;

use fleetmon_core::{AssignmentDraft, ShipmentDetails};

use crate::cli::{AssignArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::should_color;

use super::util;

pub async fn handle(args: AssignArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let draft = build_draft(args);

    // Synchronous local validation — class (c) failures stop here.
    let request = draft.validate().map_err(|e| CliError::Validation {
        reason: e.to_string(),
    })?;

    let fleet = crate::config::build_fleet(global)?;

    let pb = util::spinner(global.quiet, "assigning balise");
    let result = fleet.assign(&request).await;
    util::finish_spinner(pb);
    result?;

    if !global.quiet {
        let label = request.customer.code().label();
        if should_color(&global.color) {
            eprintln!(
                "{} balise {} assigned to {label}",
                "✓".green(),
                request.balise_id
            );
        } else {
            eprintln!("balise {} assigned to {label}", request.balise_id);
        }
    }
    Ok(())
}

/// Map CLI flags onto a draft. Optional shipment flags override the
/// form defaults only when given, mirroring the interactive sub-form.
fn build_draft(args: AssignArgs) -> AssignmentDraft {
    let mut shipment = ShipmentDetails::default();
    if let Some(v) = args.equipment_ref {
        shipment.equipment_reference = v;
    }
    if let Some(v) = args.booking_ref {
        shipment.carrier_booking_reference = v;
    }
    if let Some(v) = args.transport_order {
        shipment.transport_order = v;
    }
    if let Some(v) = args.mode {
        shipment.mode_of_transport = v;
    }
    if let Some(v) = args.partner {
        shipment.partner_name = v;
    }
    if let Some(v) = args.phase {
        shipment.transportation_phase = v;
    }
    if let Some(v) = args.location_code {
        shipment.location_code = v;
    }
    if let Some(v) = args.location_name {
        shipment.location_name = v;
    }
    if let Some(v) = args.facility_address {
        shipment.facility_address = v;
    }
    if let Some(v) = args.facility_city {
        shipment.facility_city = v;
    }

    AssignmentDraft {
        balise_id: Some(args.balise),
        customer: Some(args.customer),
        shipment,
        notes: args.notes,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use clap::Parser;

    use fleetmon_core::{CustomerCode, DraftError};

    use super::*;
    use crate::cli::Cli;

    fn parse_assign(argv: &[&str]) -> AssignArgs {
        let cli = Cli::parse_from(argv);
        match cli.command {
            crate::cli::Command::Assign(args) => args,
            other => panic!("expected assign, got {other:?}"),
        }
    }

    #[test]
    fn cmacgm_without_refs_fails_validation_locally() {
        let args = parse_assign(&["fleetmon", "assign", "--balise", "12", "--customer", "CMACGM"]);
        let draft = build_draft(args);
        assert_eq!(draft.validate(), Err(DraftError::IncompleteShipment));
    }

    #[test]
    fn flags_override_shipment_defaults() {
        let args = parse_assign(&[
            "fleetmon",
            "assign",
            "--balise",
            "12",
            "--customer",
            "CMACGM",
            "--equipment-ref",
            "APZU2106333",
            "--booking-ref",
            "LHV3076333",
            "--mode",
            "vessel",
            "--phase",
            "export",
        ]);
        let draft = build_draft(args);
        let body = draft.validate().unwrap().to_body();
        let record = body.cmacgm_data.unwrap();
        assert_eq!(record.mode_of_transport, "VESSEL");
        assert_eq!(record.transportation_phase, "EXPORT");
        // Untouched flags keep the documented defaults.
        assert_eq!(record.partner_name, "SINI TRANSPORT");
        assert_eq!(record.location_code, "BAMAKO_DEPOT_01");
    }

    #[test]
    fn standard_customer_ignores_shipment_flags() {
        let args = parse_assign(&[
            "fleetmon",
            "assign",
            "--balise",
            "7",
            "--customer",
            "DHL",
            "--equipment-ref",
            "APZU2106333",
        ]);
        let draft = build_draft(args);
        let body = draft.validate().unwrap().to_body();
        assert_eq!(body.customer, "DHL");
        assert!(body.cmacgm_data.is_none());
    }

    #[test]
    fn customer_code_parses_case_insensitively() {
        let args = parse_assign(&["fleetmon", "assign", "--balise", "1", "--customer", "maersk"]);
        assert_eq!(args.customer, CustomerCode::Maersk);
    }
}
