// src/engine/mod.rs
//
// Motor de cálculo puro: cada função é determinística sobre um `Scenario`
// imutável, sem estado compartilhado. Seguro para chamadas concorrentes.

pub mod citl;
pub mod expenses;
pub mod labor;
pub mod pricing;
pub mod supplies;

pub use pricing::{EngineVariant, calculate, preview, preview_v3};

use rust_decimal::Decimal;

/// Arredonda para 2 casas decimais (meio para cima, convenção monetária).
///
/// É o único ponto de arredondamento do motor: os intermediários correm
/// sem arredondar e cada campo apresentado passa por aqui exatamente uma
/// vez, para não acumular erro de arredondamento.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Converte um percentual da fronteira ([0, 100]) em fração.
pub(crate) fn as_fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}
