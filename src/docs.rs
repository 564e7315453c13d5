// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Precificação ---
        handlers::pricing::preview,
        handlers::pricing::preview_v3,
        handlers::pricing::presets,

        // --- Cenários ---
        handlers::scenarios::save_scenario,
        handlers::scenarios::list_scenarios,
        handlers::scenarios::get_scenario,
        handlers::scenarios::delete_scenario,
        handlers::scenarios::export_pdf,
        handlers::scenarios::export_xlsx,
    ),
    components(
        schemas(
            // --- Entradas ---
            models::params::TaxRegime,
            models::params::ParameterSet,
            models::scenario::ShiftType,
            models::scenario::SupplyCategory,
            models::scenario::ExpenseCategory,
            models::scenario::WorkPost,
            models::scenario::SupplyItem,
            models::scenario::CustomExpense,
            models::scenario::Lot,
            models::scenario::Scenario,
            models::scenario::ScenarioSummary,

            // --- Resultados ---
            models::result::PostBreakdown,
            models::result::LaborBreakdown,
            models::result::ExpenseLine,
            models::result::ExpenseGroup,
            models::result::ExpenseBreakdown,
            models::result::TaxDetail,
            models::result::MarkupBreakdown,
            models::result::LotTotal,
            models::result::PricingResult,

            // --- Presets ---
            handlers::pricing::ServicePreset,
        )
    ),
    tags(
        (name = "Precificação", description = "Cálculo de planilha de custos e formação de preços"),
        (name = "Cenários", description = "Persistência de cenários e exportação de propostas")
    )
)]
pub struct ApiDoc;
