// src/engine/supplies.rs

use rust_decimal::Decimal;

use crate::common::error::AppError;
use crate::models::scenario::SupplyItem;

/// Custo mensal de um insumo por posto: o custo total é amortizado pelo
/// período de reposição (ex.: 2 uniformes de R$ 150 a cada 6 meses =
/// R$ 50/mês).
///
/// A periodicidade zero é barrada na validação; se chegar aqui é violação
/// de invariante e o cálculo aborta sem resultado parcial, nunca produz
/// infinito ou NaN.
pub fn monthly_cost(item: &SupplyItem) -> Result<Decimal, AppError> {
    if item.replacement_months <= 0 {
        return Err(AppError::ComputationError(format!(
            "periodicidade inválida ({} meses) no insumo '{}'",
            item.replacement_months, item.description
        )));
    }
    let months = Decimal::from(item.replacement_months);
    Ok(item.unit_cost * item.qty_per_post / months)
}

/// Custo mensal de insumos de um posto: soma dos insumos do lote cujo
/// filtro de cargo é "todos" ou bate exatamente com o cargo do posto.
pub fn monthly_cost_for_role(role: &str, supplies: &[SupplyItem]) -> Result<Decimal, AppError> {
    let mut total = Decimal::ZERO;
    for item in supplies {
        if item.role_filter == "todos" || item.role_filter == role {
            total += monthly_cost(item)?;
        }
    }
    Ok(total)
}
