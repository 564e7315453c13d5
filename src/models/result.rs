// src/models/result.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::scenario::{ExpenseCategory, ShiftType};

// O resultado é sempre derivado e transitório: recalculado por inteiro a
// cada mudança de parâmetro ou item, nunca persistido separado das entradas
// (apenas o total geral é cacheado no registro do cenário, por conveniência
// de listagem).

/// Detalhe de um posto. Os componentes são valores unitários (por posto);
/// `total` já considera a quantidade de postos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostBreakdown {
    pub lot_number: i32,
    pub role: String,
    pub headcount: i32,
    pub shift: ShiftType,
    pub remuneration: Decimal,
    pub payroll_charges: Decimal,
    pub provisions: Decimal,
    pub replacement_reserve: Decimal,
    pub supplies: Decimal,
    pub unit_total: Decimal,
    pub total: Decimal,
}

/// Totais de mão de obra somados sobre todos os postos (já multiplicados
/// pela quantidade de cada posto).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaborBreakdown {
    pub remuneration: Decimal,
    pub payroll_charges: Decimal,
    pub provisions: Decimal,
    pub replacement_reserve: Decimal,
    pub supplies: Decimal,
    pub total: Decimal,
    pub posts: Vec<PostBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub unit_value: Decimal,
    pub total: Decimal,
}

/// Despesas agrupadas por lote e categoria, em ordem crescente de lote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseGroup {
    pub lot_number: i32,
    pub category: ExpenseCategory,
    pub items: Vec<ExpenseLine>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub groups: Vec<ExpenseGroup>,
    pub total: Decimal,
}

/// Detalhe dos tributos conforme o regime. União etiquetada no lugar do
/// dicionário de formato variável que o cliente antigo recebia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "regime", rename_all = "camelCase")]
pub enum TaxDetail {
    #[serde(rename = "simples")]
    Simples { rate: Decimal, amount: Decimal },
    #[serde(rename = "detalhado")]
    Itemized { pis: Decimal, cofins: Decimal, iss: Decimal },
}

/// Camada de custos indiretos, tributos e lucro (CITL/BDI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkupBreakdown {
    pub indirect_costs: Decimal,
    pub taxes: TaxDetail,
    pub taxes_total: Decimal,
    pub profit: Decimal,
    pub total: Decimal,
}

/// Custo direto por lote, em ordem numérica crescente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LotTotal {
    pub number: i32,
    pub name: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub labor: LaborBreakdown,
    pub expenses: ExpenseBreakdown,
    pub lots: Vec<LotTotal>,
    pub subtotal_before_markup: Decimal,
    pub markup: MarkupBreakdown,
    pub grand_total: Decimal,
}
