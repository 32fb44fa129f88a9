use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{CoreError, FieldError};

/// Check-in request body as sent by clients. Every field is optional here so
/// missing values are reported as field errors instead of parse failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmationForm {
    pub cpf: Option<String>,
    #[serde(rename = "assento")]
    pub seat: Option<String>,
    #[serde(rename = "malasDespachadas")]
    pub baggage_checked: Option<bool>,
    #[serde(rename = "eticket")]
    pub ticket: Option<String>,
    #[serde(rename = "dataHoraConfirmacao")]
    pub requested_at: Option<NaiveDateTime>,
}

/// A structurally valid check-in request for one passenger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub seat: String,
    pub baggage_checked: bool,
    /// Client supplied, not authoritative
    pub ticket: Option<String>,
    /// Client supplied, not authoritative
    pub requested_at: Option<NaiveDateTime>,
}

impl ConfirmationRequest {
    pub fn new(seat: impl Into<String>, baggage_checked: bool) -> Self {
        Self {
            seat: seat.into(),
            baggage_checked,
            ticket: None,
            requested_at: None,
        }
    }
}

const BLANK: &str = "must not be blank";
const NULL: &str = "must not be null";

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ConfirmationForm {
    /// Check required fields and split the form into the passenger id and the request.
    /// Errors are reported in field order.
    pub fn validate(self) -> Result<(String, ConfirmationRequest), CoreError> {
        let cpf = present(self.cpf);
        let seat = present(self.seat);

        let mut errors = Vec::new();
        if cpf.is_none() {
            errors.push(FieldError::new("cpf", BLANK));
        }
        if seat.is_none() {
            errors.push(FieldError::new("assento", BLANK));
        }
        if self.baggage_checked.is_none() {
            errors.push(FieldError::new("malasDespachadas", NULL));
        }

        match (cpf, seat, self.baggage_checked) {
            (Some(cpf), Some(seat), Some(baggage_checked)) => Ok((
                cpf,
                ConfirmationRequest {
                    seat,
                    baggage_checked,
                    ticket: self.ticket,
                    requested_at: self.requested_at,
                },
            )),
            _ => Err(CoreError::ValidationFailed(errors)),
        }
    }
}
