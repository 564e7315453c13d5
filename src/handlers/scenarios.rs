// src/handlers/scenarios.rs

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::scenario::{Scenario, ScenarioSummary},
};

// POST /api/cenarios
// Cria ou atualiza: a presença de `id` no corpo decide.
#[utoipa::path(
    post,
    path = "/api/cenarios",
    tag = "Cenários",
    request_body = Scenario,
    responses(
        (status = 200, description = "Cenário salvo; retorna o id"),
        (status = 400, description = "Cenário com campos inválidos"),
        (status = 404, description = "Id informado não existe"),
        (status = 422, description = "Alíquotas de tributos e lucro somam 100% ou mais")
    )
)]
pub async fn save_scenario(
    State(app_state): State<AppState>,
    Json(scenario): Json<Scenario>,
) -> Result<impl IntoResponse, AppError> {
    let id = app_state.scenario_service.save(&scenario).await?;
    Ok((StatusCode::OK, Json(json!({ "id": id }))))
}

// GET /api/cenarios
#[utoipa::path(
    get,
    path = "/api/cenarios",
    tag = "Cenários",
    responses(
        (status = 200, description = "Cenários salvos, mais recentes primeiro", body = Vec<ScenarioSummary>)
    )
)]
pub async fn list_scenarios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summaries = app_state.scenario_service.list().await?;
    Ok((StatusCode::OK, Json(summaries)))
}

// GET /api/cenarios/{id}
#[utoipa::path(
    get,
    path = "/api/cenarios/{id}",
    tag = "Cenários",
    params(("id" = Uuid, Path, description = "Id do cenário")),
    responses(
        (status = 200, description = "Cenário completo para edição", body = Scenario),
        (status = 404, description = "Cenário não encontrado")
    )
)]
pub async fn get_scenario(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let scenario = app_state.scenario_service.load(id).await?;
    Ok((StatusCode::OK, Json(scenario)))
}

// DELETE /api/cenarios/{id}
#[utoipa::path(
    delete,
    path = "/api/cenarios/{id}",
    tag = "Cenários",
    params(("id" = Uuid, Path, description = "Id do cenário")),
    responses(
        (status = 204, description = "Cenário excluído"),
        (status = 404, description = "Cenário não encontrado")
    )
)]
pub async fn delete_scenario(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.scenario_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/cenarios/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/cenarios/{id}/pdf",
    tag = "Cenários",
    params(("id" = Uuid, Path, description = "Id do cenário")),
    responses(
        (status = 200, description = "Proposta em PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Cenário não encontrado")
    )
)]
pub async fn export_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = app_state.report_service.generate_proposal_pdf(id).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"proposta-{}.pdf\"", id),
        ),
    ];
    Ok((StatusCode::OK, headers, bytes))
}

// GET /api/cenarios/{id}/xlsx
#[utoipa::path(
    get,
    path = "/api/cenarios/{id}/xlsx",
    tag = "Cenários",
    params(("id" = Uuid, Path, description = "Id do cenário")),
    responses(
        (status = 200, description = "Planilha de custos em Excel", body = Vec<u8>,
         content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 404, description = "Cenário não encontrado")
    )
)]
pub async fn export_xlsx(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = app_state.report_service.generate_proposal_xlsx(id).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"planilha-{}.xlsx\"", id),
        ),
    ];
    Ok((StatusCode::OK, headers, bytes))
}
