// src/handlers/pricing.rs

use std::collections::BTreeMap;

use axum::{Json, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    engine,
    models::result::PricingResult,
    models::scenario::{Scenario, ShiftType, SupplyCategory, SupplyItem, WorkPost},
};

// Os dois endpoints de cálculo são puros: recebem o cenário inteiro no corpo
// e devolvem o resultado completo, sem tocar no banco. O frontend chama a
// cada edição de campo para atualizar a planilha em tempo real.

// POST /api/precificacao/preview
#[utoipa::path(
    post,
    path = "/api/precificacao/preview",
    tag = "Precificação",
    request_body = Scenario,
    responses(
        (status = 200, description = "Resultado completo da precificação (sem despesas diversas)", body = PricingResult),
        (status = 400, description = "Cenário com campos inválidos"),
        (status = 422, description = "Alíquotas de tributos e lucro somam 100% ou mais")
    )
)]
pub async fn preview(Json(scenario): Json<Scenario>) -> Result<impl IntoResponse, AppError> {
    let result = engine::preview(&scenario)?;
    Ok((StatusCode::OK, Json(result)))
}

// POST /api/precificacao/preview-v3
#[utoipa::path(
    post,
    path = "/api/precificacao/preview-v3",
    tag = "Precificação",
    request_body = Scenario,
    responses(
        (status = 200, description = "Resultado completo da precificação (com despesas diversas)", body = PricingResult),
        (status = 400, description = "Cenário com campos inválidos"),
        (status = 422, description = "Alíquotas de tributos e lucro somam 100% ou mais")
    )
)]
pub async fn preview_v3(Json(scenario): Json<Scenario>) -> Result<impl IntoResponse, AppError> {
    let result = engine::preview_v3(&scenario)?;
    Ok((StatusCode::OK, Json(result)))
}

// ---
// Presets por categoria de serviço
// ---

/// Dados iniciais de um tipo de serviço, para preencher um cenário novo.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePreset {
    pub posts: Vec<WorkPost>,
    pub supplies: Vec<SupplyItem>,
}

fn posto(role: &str, shift: ShiftType, base_wage: Decimal) -> WorkPost {
    WorkPost {
        role: role.to_string(),
        headcount: 1,
        shift,
        base_wage,
        unhealthy_premium: Decimal::ZERO,
        hazard_premium: Decimal::ZERO,
        night_shift_pct: Decimal::new(20, 0),
        bonus: Decimal::ZERO,
    }
}

fn insumo(
    category: SupplyCategory,
    description: &str,
    unit_cost: Decimal,
    qty_per_post: Decimal,
    replacement_months: i32,
) -> SupplyItem {
    SupplyItem {
        category,
        description: description.to_string(),
        unit_cost,
        qty_per_post,
        replacement_months,
        role_filter: "todos".to_string(),
    }
}

fn build_presets() -> BTreeMap<&'static str, ServicePreset> {
    use SupplyCategory::{Epi, Uniforme};

    let mut presets = BTreeMap::new();

    presets.insert(
        "Portaria",
        ServicePreset {
            posts: vec![posto("Porteiro", ShiftType::Noturno12x36, Decimal::new(1500, 0))],
            supplies: vec![insumo(
                Uniforme,
                "Uniforme completo (calça, camisa, sapato)",
                Decimal::new(150, 0),
                Decimal::new(2, 0),
                6,
            )],
        },
    );

    let mut limpeza = posto("Auxiliar de Limpeza", ShiftType::Horas44, Decimal::new(1400, 0));
    limpeza.unhealthy_premium = Decimal::new(200, 0);
    presets.insert(
        "Limpeza",
        ServicePreset {
            posts: vec![limpeza],
            supplies: vec![
                insumo(Uniforme, "Uniforme de limpeza", Decimal::new(120, 0), Decimal::new(2, 0), 6),
                insumo(Epi, "Luvas e botas", Decimal::new(60, 0), Decimal::new(1, 0), 3),
            ],
        },
    );

    let mut copeira = posto("Copeira", ShiftType::Horas40, Decimal::new(1450, 0));
    copeira.bonus = Decimal::new(100, 0);
    presets.insert(
        "Copeiragem",
        ServicePreset {
            posts: vec![copeira],
            supplies: vec![insumo(
                Uniforme,
                "Uniforme de copeira",
                Decimal::new(130, 0),
                Decimal::new(2, 0),
                6,
            )],
        },
    );

    presets.insert(
        "Zeladoria",
        ServicePreset {
            posts: vec![posto("Zelador", ShiftType::Horas44, Decimal::new(1600, 0))],
            supplies: vec![
                insumo(Uniforme, "Uniforme de zelador", Decimal::new(140, 0), Decimal::new(2, 0), 6),
                insumo(Epi, "Equipamentos de proteção", Decimal::new(80, 0), Decimal::new(1, 0), 6),
            ],
        },
    );

    presets
}

// GET /api/precificacao/presets
#[utoipa::path(
    get,
    path = "/api/precificacao/presets",
    tag = "Precificação",
    responses(
        (status = 200, description = "Presets de postos e insumos por categoria de serviço")
    )
)]
pub async fn presets() -> impl IntoResponse {
    (StatusCode::OK, Json(build_presets()))
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn presets_passam_na_validacao_de_cenario() {
        for (nome, preset) in build_presets() {
            let cenario = Scenario {
                id: None,
                name: format!("Preset {}", nome),
                service_type: Some(nome.to_string()),
                params: Default::default(),
                lots: vec![crate::models::scenario::Lot {
                    number: 1,
                    name: "Lote 1".into(),
                    posts: preset.posts,
                    supplies: preset.supplies,
                }],
                expenses: vec![],
            };
            assert!(cenario.validate().is_ok(), "preset inválido: {}", nome);
            assert!(engine::preview_v3(&cenario).is_ok(), "preset não calcula: {}", nome);
        }
    }
}
