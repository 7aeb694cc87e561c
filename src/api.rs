//! HTTP API for the pay calculator.
//!
//! This module exposes the engine over a small JSON API built with
//! [`axum`](https://crates.io/crates/axum).  The API is stateless: a
//! form front-end sends its complete input snapshot on every change
//! and receives the complete derived result.  The only shared state
//! is the immutable server [`Config`].

use crate::allowances::{suggest_cgegis, tpta_toggle_applies};
use crate::config::Config;
use crate::engine::{calculate, normalize_stage, on_level_change, stage_table};
use crate::error::SalaryError;
use crate::format::format_inr;
use crate::matrix::{level_at, PayLevel, PAY_LEVELS};
use crate::models::{RawSalaryInputs, SalaryInputs, SalaryResult, HIGHER_TPTA_CITIES_DESC};
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Application state shared across requests.
pub struct AppState {
    pub config: Config,
}

/// One pay level as offered in the level selector.
#[derive(Debug, Serialize)]
pub struct LevelView {
    pub index: usize,
    pub label: String,
    #[serde(flatten)]
    pub level: PayLevel,
    pub tpta_toggle_applies: bool,
    pub suggested_cgegis: i64,
}

#[derive(Debug, Serialize)]
pub struct StagesResponse {
    pub index: usize,
    pub label: String,
    pub stages: Vec<i64>,
    pub suggested_cgegis: i64,
}

#[derive(Debug, Serialize)]
pub struct DefaultsResponse {
    pub inputs: SalaryInputs,
    pub higher_tpta_cities: &'static str,
}

/// Totals rendered as rupee strings.
#[derive(Debug, Serialize)]
pub struct FormattedTotals {
    pub gross_earnings: String,
    pub total_deductions: String,
    pub net_salary: String,
}

/// Short explanations shown next to the HRA and TA amounts.
#[derive(Debug, Serialize)]
pub struct Notes {
    pub hra: String,
    pub ta: String,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    /// The inputs actually used, after stage normalisation.
    pub inputs: SalaryInputs,
    pub result: SalaryResult,
    pub formatted: FormattedTotals,
    pub notes: Notes,
}

#[derive(Debug, Deserialize)]
pub struct LevelChangeRequest {
    pub level_index: usize,
    #[serde(default)]
    pub inputs: SalaryInputs,
}

/// Build the API router around the given configuration.  Returns the
/// router and a handle to the state.
pub fn build_router(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState { config });
    let router = Router::new()
        .route("/api/levels", get(levels_handler))
        .route("/api/levels/:index/stages", get(stages_handler))
        .route("/api/defaults", get(defaults_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/calculate/form", post(calculate_form_handler))
        .route("/api/level-change", post(level_change_handler))
        .route("/api/stage-table", post(stage_table_handler))
        .with_state(state.clone());
    (router, state)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn salary_error_response(err: SalaryError) -> Response {
    warn!("rejecting request: {err}");
    let status = match err {
        SalaryError::UnknownLevel { .. } => StatusCode::BAD_REQUEST,
        SalaryError::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &err.to_string())
}

fn level_view(index: usize, level: &PayLevel) -> LevelView {
    LevelView {
        index,
        label: level.label(),
        level: *level,
        tpta_toggle_applies: tpta_toggle_applies(level.level),
        suggested_cgegis: suggest_cgegis(level.level),
    }
}

fn notes_for(level: &PayLevel, inputs: &SalaryInputs, result: &SalaryResult) -> Notes {
    let hra = if result.hra_amount == result.hra_floor {
        format!("Minimum floor ({}) applied", format_inr(result.hra_floor))
    } else {
        format!("{}% of basic pay", result.hra_percent)
    };
    let ta = if !tpta_toggle_applies(level.level) {
        "Fixed TA for level 14 and above (₹15,750 + DA)".to_string()
    } else if inputs.higher_tpta_city {
        "Higher TPTA city rate".to_string()
    } else {
        "Standard TPTA rate".to_string()
    };
    Notes { hra, ta }
}

fn respond_with_calculation(inputs: SalaryInputs) -> Response {
    // Pull the basic pay back onto the level's stages before calculating,
    // and echo the corrected inputs so the form can follow.
    let outcome = normalize_stage(&inputs).and_then(|inputs| {
        let level = level_at(inputs.level_index)?;
        let result = calculate(&inputs)?;
        Ok((level, inputs, result))
    });
    match outcome {
        Ok((level, inputs, result)) => {
            let body = CalculateResponse {
                formatted: FormattedTotals {
                    gross_earnings: format_inr(result.gross_earnings),
                    total_deductions: format_inr(result.total_deductions),
                    net_salary: format_inr(result.net_salary),
                },
                notes: notes_for(level, &inputs, &result),
                inputs,
                result,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => salary_error_response(err),
    }
}

/// Handler for GET /api/levels
async fn levels_handler() -> Response {
    // Selectors address a level by its table position
    let levels: Vec<LevelView> = PAY_LEVELS
        .iter()
        .enumerate()
        .map(|(index, level)| level_view(index, level))
        .collect();
    Json(levels).into_response()
}

/// Handler for GET /api/levels/:index/stages
async fn stages_handler(Path(index): Path<usize>) -> Response {
    match level_at(index) {
        Ok(level) => Json(StagesResponse {
            index,
            label: level.label(),
            stages: level.stages(),
            suggested_cgegis: suggest_cgegis(level.level),
        })
        .into_response(),
        Err(err) => salary_error_response(err),
    }
}

/// Handler for GET /api/defaults
async fn defaults_handler(State(app_state): State<Arc<AppState>>) -> Response {
    let inputs = SalaryInputs {
        da_percent: app_state.config.default_da_percent,
        ..SalaryInputs::default()
    };
    Json(DefaultsResponse {
        inputs,
        higher_tpta_cities: HIGHER_TPTA_CITIES_DESC,
    })
    .into_response()
}

/// Handler for POST /api/calculate
async fn calculate_handler(Json(inputs): Json<SalaryInputs>) -> Response {
    respond_with_calculation(inputs)
}

/// Handler for POST /api/calculate/form: form fields sent as text or
/// numbers, coerced with a zero fallback.
async fn calculate_form_handler(Json(raw): Json<RawSalaryInputs>) -> Response {
    respond_with_calculation(SalaryInputs::from(raw))
}

/// Handler for POST /api/level-change
async fn level_change_handler(Json(request): Json<LevelChangeRequest>) -> Response {
    match on_level_change(request.level_index, &request.inputs) {
        Ok(inputs) => Json(inputs).into_response(),
        Err(err) => salary_error_response(err),
    }
}

/// Handler for POST /api/stage-table
async fn stage_table_handler(Json(inputs): Json<SalaryInputs>) -> Response {
    match stage_table(&inputs) {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => salary_error_response(err),
    }
}

/// Launch the API server.  Binds to the configured address and blocks
/// until the server terminates.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr;
    let (router, _state) = build_router(config);
    let listener = TcpListener::bind(addr).await?;
    info!("pay calculator listening on http://{addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
