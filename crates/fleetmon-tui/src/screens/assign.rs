//! Assignment modal — the interactive face of the assignment workflow.
//!
//! Collects a balise, a customer, the CMA-CGM sub-form when that customer
//! is chosen, and free-text notes. Validation is synchronous and local
//! (`AssignmentDraft::validate`); only a valid draft leaves this component,
//! as an [`Action::SubmitAssignment`]. A rejected submission keeps every
//! field intact for retry; a successful one closes the modal, and the next
//! open starts from a fresh draft with all documented defaults.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use fleetmon_core::{
    AssignmentDraft, Balise, CustomerCode, ShipmentDetails, TransportMode, TransportPhase,
    unassigned_balises,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

// ── Focusable fields ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Balise,
    Customer,
    EquipmentRef,
    BookingRef,
    TransportOrder,
    Mode,
    Partner,
    Phase,
    LocationCode,
    LocationName,
    FacilityAddress,
    FacilityCity,
    Notes,
    Submit,
}

const SHIPMENT_FIELDS: [Field; 10] = [
    Field::EquipmentRef,
    Field::BookingRef,
    Field::TransportOrder,
    Field::Mode,
    Field::Partner,
    Field::Phase,
    Field::LocationCode,
    Field::LocationName,
    Field::FacilityAddress,
    Field::FacilityCity,
];

// ── Component ───────────────────────────────────────────────────────

pub struct AssignModal {
    /// `(id, label)` pairs for the balise picker — unassigned only.
    options: Vec<(i64, String)>,
    balise_idx: Option<usize>,
    customer_idx: Option<usize>,
    mode_idx: usize,
    phase_idx: usize,
    focus: Field,
    // Text inputs, pre-seeded with the sub-form defaults.
    equipment_ref: Input,
    booking_ref: Input,
    transport_order: Input,
    partner: Input,
    location_code: Input,
    location_name: Input,
    facility_address: Input,
    facility_city: Input,
    notes: Input,
    error: Option<String>,
    submitting: bool,
}

impl AssignModal {
    /// Build the modal from the current snapshot. Already-assigned
    /// balises never reach the picker.
    pub fn new(balises: &[Balise]) -> Self {
        let options = unassigned_balises(balises)
            .into_iter()
            .map(|b| (b.id, format!("{} ({})", b.name, b.imei)))
            .collect();

        let defaults = ShipmentDetails::default();
        Self {
            options,
            balise_idx: None,
            customer_idx: None,
            mode_idx: 0,
            phase_idx: 0,
            focus: Field::Balise,
            equipment_ref: Input::new(defaults.equipment_reference),
            booking_ref: Input::new(defaults.carrier_booking_reference),
            transport_order: Input::new(defaults.transport_order),
            partner: Input::new(defaults.partner_name),
            location_code: Input::new(defaults.location_code),
            location_name: Input::new(defaults.location_name),
            facility_address: Input::new(defaults.facility_address),
            facility_city: Input::new(defaults.facility_city),
            notes: Input::default(),
            error: None,
            submitting: false,
        }
    }

    fn selected_customer(&self) -> Option<CustomerCode> {
        self.customer_idx.map(|i| CustomerCode::ALL[i])
    }

    fn shipment_visible(&self) -> bool {
        self.selected_customer()
            .is_some_and(CustomerCode::is_distinguished)
    }

    /// Fields in traversal order for the current customer selection.
    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Balise, Field::Customer];
        if self.shipment_visible() {
            fields.extend(SHIPMENT_FIELDS);
        }
        fields.push(Field::Notes);
        fields.push(Field::Submit);
        fields
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let idx = fields.iter().position(|&f| f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % fields.len()
        } else {
            (idx + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    /// Cycle a picker: placeholder → first → … → last → placeholder.
    fn cycle_option(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match (current, forward) {
            (None, true) => Some(0),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(_), true) => None,
            (None, false) => Some(len - 1),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        }
    }

    fn cycle_focused_picker(&mut self, forward: bool) {
        match self.focus {
            Field::Balise => {
                self.balise_idx = Self::cycle_option(self.balise_idx, self.options.len(), forward);
            }
            Field::Customer => {
                self.customer_idx =
                    Self::cycle_option(self.customer_idx, CustomerCode::ALL.len(), forward);
                // The sub-form may have just disappeared — refocus if so.
                if !self.fields().contains(&self.focus) {
                    self.focus = Field::Customer;
                }
            }
            Field::Mode => {
                let len = TransportMode::ALL.len();
                self.mode_idx = if forward {
                    (self.mode_idx + 1) % len
                } else {
                    (self.mode_idx + len - 1) % len
                };
            }
            Field::Phase => {
                let len = TransportPhase::ALL.len();
                self.phase_idx = if forward {
                    (self.phase_idx + 1) % len
                } else {
                    (self.phase_idx + len - 1) % len
                };
            }
            _ => {}
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            Field::EquipmentRef => Some(&mut self.equipment_ref),
            Field::BookingRef => Some(&mut self.booking_ref),
            Field::TransportOrder => Some(&mut self.transport_order),
            Field::Partner => Some(&mut self.partner),
            Field::LocationCode => Some(&mut self.location_code),
            Field::LocationName => Some(&mut self.location_name),
            Field::FacilityAddress => Some(&mut self.facility_address),
            Field::FacilityCity => Some(&mut self.facility_city),
            Field::Notes => Some(&mut self.notes),
            _ => None,
        }
    }

    /// The draft as currently entered.
    fn current_draft(&self) -> AssignmentDraft {
        AssignmentDraft {
            balise_id: self.balise_idx.and_then(|i| self.options.get(i)).map(|o| o.0),
            customer: self.selected_customer(),
            shipment: ShipmentDetails {
                equipment_reference: self.equipment_ref.value().into(),
                carrier_booking_reference: self.booking_ref.value().into(),
                transport_order: self.transport_order.value().into(),
                mode_of_transport: TransportMode::ALL[self.mode_idx],
                partner_name: self.partner.value().into(),
                transportation_phase: TransportPhase::ALL[self.phase_idx],
                location_code: self.location_code.value().into(),
                location_name: self.location_name.value().into(),
                facility_address: self.facility_address.value().into(),
                facility_city: self.facility_city.value().into(),
            },
            notes: self.notes.value().into(),
        }
    }

    /// Validate and, on success, hand the request to the app loop.
    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        match self.current_draft().validate() {
            Ok(request) => {
                self.error = None;
                self.submitting = true;
                Some(Action::SubmitAssignment(request))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    // ── Rendering helpers ────────────────────────────────────────────

    fn picker_line<'a>(&self, field: Field, label: &'a str, value: String) -> Line<'a> {
        let focused = self.focus == field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            theme::field_label_focused()
        } else {
            theme::field_label()
        };
        let value_span = if focused {
            Span::styled(format!("◂ {value} ▸"), theme::table_selected())
        } else {
            Span::styled(value, theme::table_row())
        };
        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{label:<22}"), label_style),
            value_span,
        ])
    }

    fn input_line<'a>(&self, field: Field, label: &'a str, input: &Input) -> Line<'a> {
        let focused = self.focus == field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            theme::field_label_focused()
        } else {
            theme::field_label()
        };
        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{label:<22}"), label_style),
            Span::styled(input.value().to_owned(), theme::table_row()),
        ];
        if focused {
            spans.push(Span::styled("█", theme::border_focused()));
        }
        Line::from(spans)
    }
}

impl Component for AssignModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.submitting {
            // One POST at a time; Esc still dismisses the surface.
            if key.code == KeyCode::Esc {
                return Ok(Some(Action::CloseAssign));
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => return Ok(Some(Action::CloseAssign)),
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Left | KeyCode::Right
                if matches!(
                    self.focus,
                    Field::Balise | Field::Customer | Field::Mode | Field::Phase
                ) =>
            {
                self.cycle_focused_picker(key.code == KeyCode::Right);
            }
            KeyCode::Enter => {
                if self.focus == Field::Submit {
                    return Ok(self.submit());
                }
                self.move_focus(true);
            }
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.handle_event(&crossterm::event::Event::Key(key));
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        // Success closes the modal from the app loop; only failure
        // reaches us — keep everything entered and show the message.
        if let Action::AssignmentResult(Err(message)) = action {
            self.submitting = false;
            self.error = Some(message.clone());
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let shipment = self.shipment_visible();
        let height = if shipment { 24 } else { 12 };
        let width = 64u16.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(2));

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let modal_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(" Assign Balise ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let balise_value = self
            .balise_idx
            .and_then(|i| self.options.get(i))
            .map_or_else(|| "Choose balise…".to_owned(), |o| o.1.clone());
        let customer_value = self
            .selected_customer()
            .map_or_else(|| "Choose customer…".to_owned(), |c| c.label().to_owned());

        let mut lines = vec![
            self.picker_line(Field::Balise, "Balise", balise_value),
            self.picker_line(Field::Customer, "Customer", customer_value),
        ];

        if shipment {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  CMA-CGM Container Info",
                theme::title_style(),
            )));
            lines.push(self.input_line(Field::EquipmentRef, "Equipment Ref *", &self.equipment_ref));
            lines.push(self.input_line(Field::BookingRef, "Booking Ref *", &self.booking_ref));
            lines.push(self.input_line(
                Field::TransportOrder,
                "Transport Order",
                &self.transport_order,
            ));
            lines.push(self.picker_line(
                Field::Mode,
                "Mode of Transport",
                TransportMode::ALL[self.mode_idx].label().to_owned(),
            ));
            lines.push(self.input_line(Field::Partner, "Partner Name", &self.partner));
            lines.push(self.picker_line(
                Field::Phase,
                "Phase",
                TransportPhase::ALL[self.phase_idx].as_wire().to_owned(),
            ));
            lines.push(self.input_line(Field::LocationCode, "Location Code", &self.location_code));
            lines.push(self.input_line(Field::LocationName, "Location Name", &self.location_name));
            lines.push(self.input_line(
                Field::FacilityAddress,
                "Facility Address",
                &self.facility_address,
            ));
            lines.push(self.input_line(Field::FacilityCity, "Facility City", &self.facility_city));
        }

        lines.push(Line::from(""));
        lines.push(self.input_line(Field::Notes, "Notes", &self.notes));
        lines.push(Line::from(""));

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                theme::form_error(),
            )));
        }

        let submit_style = if self.focus == Field::Submit {
            theme::table_selected()
        } else {
            theme::key_hint()
        };
        let submit_text = if self.submitting {
            "  [ Assigning… ]"
        } else {
            "  [ Assign Balise ]"
        };
        lines.push(Line::from(Span::styled(submit_text, submit_style)));
        lines.push(Line::from(Span::styled(
            "  Tab next · ◂ ▸ choose · Enter submit · Esc cancel",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn id(&self) -> &str {
        "assign"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use fleetmon_core::{CustomerAssignment, DraftError};

    use super::*;

    fn balises() -> Vec<Balise> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "B-01", "imei": "861", "customer": "DHL"},
            {"id": 2, "name": "B-02", "imei": "862"},
            {"id": 3, "name": "B-03", "imei": "863", "customer": ""}
        ]))
        .unwrap()
    }

    fn key(modal: &mut AssignModal, code: KeyCode) -> Option<Action> {
        modal.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    fn type_str(modal: &mut AssignModal, text: &str) {
        for ch in text.chars() {
            key(modal, KeyCode::Char(ch));
        }
    }

    /// Drive focus to the submit line and press Enter.
    fn press_submit(modal: &mut AssignModal) -> Option<Action> {
        for _ in 0..20 {
            if modal.focus == Field::Submit {
                break;
            }
            key(modal, KeyCode::Tab);
        }
        assert_eq!(modal.focus, Field::Submit);
        key(modal, KeyCode::Enter)
    }

    #[test]
    fn picker_holds_only_unassigned_balises() {
        let modal = AssignModal::new(&balises());
        let ids: Vec<i64> = modal.options.iter().map(|o| o.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn empty_inventory_leaves_only_the_placeholder() {
        let mut modal = AssignModal::new(&[]);
        assert!(modal.options.is_empty());
        // Cycling has nothing to land on.
        key(&mut modal, KeyCode::Right);
        assert_eq!(modal.balise_idx, None);
    }

    #[test]
    fn submit_without_selection_is_blocked_locally() {
        let mut modal = AssignModal::new(&balises());
        let action = press_submit(&mut modal);
        assert!(action.is_none());
        assert_eq!(
            modal.error.as_deref(),
            Some(DraftError::MissingSelection.to_string().as_str())
        );
        assert!(!modal.submitting);
    }

    #[test]
    fn cmacgm_with_equipment_only_is_blocked_locally() {
        let mut modal = AssignModal::new(&balises());
        key(&mut modal, KeyCode::Right); // balise → B-02
        key(&mut modal, KeyCode::Tab);
        key(&mut modal, KeyCode::Right); // customer → CMA-CGM
        assert!(modal.shipment_visible());

        key(&mut modal, KeyCode::Tab); // equipment ref
        assert_eq!(modal.focus, Field::EquipmentRef);
        type_str(&mut modal, "APZU2106333");

        let action = press_submit(&mut modal);
        assert!(action.is_none(), "must not submit without booking ref");
        assert_eq!(
            modal.error.as_deref(),
            Some(DraftError::IncompleteShipment.to_string().as_str())
        );
    }

    #[test]
    fn complete_cmacgm_form_submits_with_shipment_data() {
        let mut modal = AssignModal::new(&balises());
        key(&mut modal, KeyCode::Right); // balise → B-02
        key(&mut modal, KeyCode::Tab);
        key(&mut modal, KeyCode::Right); // customer → CMA-CGM
        key(&mut modal, KeyCode::Tab);
        type_str(&mut modal, "APZU2106333");
        key(&mut modal, KeyCode::Tab);
        type_str(&mut modal, "LHV3076333");

        let action = press_submit(&mut modal).expect("valid form must submit");
        let Action::SubmitAssignment(request) = action else {
            panic!("expected SubmitAssignment, got {action:?}");
        };
        assert_eq!(request.balise_id, 2);
        let CustomerAssignment::Cmacgm(shipment) = request.customer else {
            panic!("expected the distinguished variant");
        };
        assert_eq!(shipment.equipment_reference, "APZU2106333");
        // Untouched sub-form fields carry the documented defaults.
        assert_eq!(shipment.partner_name, "SINI TRANSPORT");
        assert_eq!(shipment.location_code, "BAMAKO_DEPOT_01");
        assert!(modal.submitting);
    }

    #[test]
    fn standard_customer_submits_without_shipment_data() {
        let mut modal = AssignModal::new(&balises());
        key(&mut modal, KeyCode::Right); // balise
        key(&mut modal, KeyCode::Tab);
        key(&mut modal, KeyCode::Right); // CMA-CGM
        key(&mut modal, KeyCode::Right); // DHL
        assert!(!modal.shipment_visible());

        let action = press_submit(&mut modal).expect("valid form must submit");
        let Action::SubmitAssignment(request) = action else {
            panic!("expected SubmitAssignment");
        };
        assert_eq!(
            request.customer,
            CustomerAssignment::Standard(CustomerCode::Dhl)
        );
        assert!(request.to_body().cmacgm_data.is_none());
    }

    #[test]
    fn rejected_submission_keeps_the_form_intact() {
        let mut modal = AssignModal::new(&balises());
        key(&mut modal, KeyCode::Right);
        key(&mut modal, KeyCode::Tab);
        key(&mut modal, KeyCode::Right);
        key(&mut modal, KeyCode::Tab);
        type_str(&mut modal, "APZU2106333");
        key(&mut modal, KeyCode::Tab);
        type_str(&mut modal, "LHV3076333");
        press_submit(&mut modal).unwrap();

        // Backend said no.
        modal
            .update(&Action::AssignmentResult(Err("HTTP 400: already assigned".into())))
            .unwrap();

        assert!(!modal.submitting);
        assert_eq!(modal.error.as_deref(), Some("HTTP 400: already assigned"));
        // Everything the user typed is still there.
        assert_eq!(modal.equipment_ref.value(), "APZU2106333");
        assert_eq!(modal.booking_ref.value(), "LHV3076333");
        assert_eq!(modal.balise_idx, Some(0));
        assert_eq!(modal.selected_customer(), Some(CustomerCode::Cmacgm));
    }

    #[test]
    fn no_double_submit_while_in_flight() {
        let mut modal = AssignModal::new(&balises());
        key(&mut modal, KeyCode::Right);
        key(&mut modal, KeyCode::Tab);
        key(&mut modal, KeyCode::Right);
        key(&mut modal, KeyCode::Right); // DHL
        press_submit(&mut modal).unwrap();

        // Second Enter must be ignored until a result arrives.
        assert!(key(&mut modal, KeyCode::Enter).is_none());
    }

    #[test]
    fn switching_away_from_cmacgm_hides_the_subform() {
        let mut modal = AssignModal::new(&balises());
        key(&mut modal, KeyCode::Tab); // customer
        key(&mut modal, KeyCode::Right); // CMA-CGM
        assert!(modal.fields().contains(&Field::EquipmentRef));

        key(&mut modal, KeyCode::Right); // DHL
        assert!(!modal.fields().contains(&Field::EquipmentRef));
        assert_eq!(modal.focus, Field::Customer);
    }
}
