use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use labsky_core::{ConfirmationForm, ConfirmationReceipt, CoreError, PassengerProfile};
use labsky_shared::{LoyaltyTier, Passenger};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerResponse {
    pub cpf: String,
    pub nome: String,
    #[serde(with = "labsky_shared::wire::br_date")]
    pub data_nascimento: NaiveDate,
    pub classificacao: LoyaltyTier,
    pub milhas: u32,
    pub confirmacao: Option<ConfirmationView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    pub eticket: String,
    pub assento: String,
    pub data_hora_confirmacao: DateTime<Utc>,
    pub malas_despachadas: bool,
}

impl From<Passenger> for PassengerResponse {
    fn from(p: Passenger) -> Self {
        let confirmacao = p.confirmation().map(|c| ConfirmationView {
            eticket: c.ticket.clone(),
            assento: c.seat.clone(),
            data_hora_confirmacao: c.confirmed_at,
            malas_despachadas: c.baggage_checked,
        });
        Self {
            cpf: p.cpf,
            nome: p.name.into_inner(),
            data_nascimento: p.birth_date,
            classificacao: p.tier,
            milhas: p.mileage,
            confirmacao,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub cpf: String,
    pub nome: String,
    #[serde(with = "labsky_shared::wire::br_date")]
    pub data_nascimento: NaiveDate,
    pub classificacao: LoyaltyTier,
    pub milhas: u32,
}

impl From<PassengerProfile> for ProfileResponse {
    fn from(p: PassengerProfile) -> Self {
        Self {
            cpf: p.cpf,
            nome: p.name,
            data_nascimento: p.birth_date,
            classificacao: p.tier,
            milhas: p.mileage,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResponse {
    pub eticket: String,
    pub data_hora_confirmacao: DateTime<Utc>,
}

impl From<ConfirmationReceipt> for ConfirmationResponse {
    fn from(r: ConfirmationReceipt) -> Self {
        Self {
            eticket: r.ticket,
            data_hora_confirmacao: r.confirmed_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/passengers", get(list_passengers))
        .route("/passengers/confirmation", post(confirm_checkin))
        .route("/passengers/{cpf}", get(get_passenger))
}

/// GET /passengers
pub async fn list_passengers(State(state): State<AppState>) -> Result<Json<Vec<PassengerResponse>>, AppError> {
    let passengers = state.passengers.list().await?;
    Ok(Json(passengers.into_iter().map(PassengerResponse::from).collect()))
}

/// GET /passengers/{cpf}
pub async fn get_passenger(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.passengers.get_profile(&cpf).await?;
    Ok(Json(profile.into()))
}

/// POST /passengers/confirmation
/// Check a passenger in and assign the requested seat
pub async fn confirm_checkin(
    State(state): State<AppState>,
    payload: Result<Json<ConfirmationForm>, JsonRejection>,
) -> Result<Json<ConfirmationResponse>, AppError> {
    let Json(form) = payload.map_err(|rejection| {
        state.metrics.record_checkin("MALFORMED");
        AppError::BadRequest(rejection.body_text())
    })?;

    match checkin(&state, form).await {
        Ok(receipt) => {
            state.metrics.record_checkin("CONFIRMED");
            Ok(Json(receipt.into()))
        }
        Err(err) => {
            state.metrics.record_checkin(err.code());
            tracing::info!(code = err.code(), "Check-in rejected: {}", err);
            Err(err.into())
        }
    }
}

async fn checkin(state: &AppState, form: ConfirmationForm) -> Result<ConfirmationReceipt, CoreError> {
    let (cpf, request) = form.validate()?;
    state.checkin.confirm(&cpf, &request).await
}
