// src/engine/citl.rs

use rust_decimal::Decimal;

use crate::common::error::AppError;
use crate::engine::{as_fraction, round_half_up};
use crate::models::params::{ParameterSet, TaxRegime};
use crate::models::result::TaxDetail;

/// Camada de CITL/BDI calculada sobre o subtotal de custos diretos.
/// Valores brutos, sem arredondar; `tax_detail` já vem arredondado para
/// apresentação.
#[derive(Debug, Clone)]
pub struct Markup {
    pub indirect_costs: Decimal,
    pub taxes_total: Decimal,
    pub profit: Decimal,
    pub tax_detail: TaxDetail,
}

impl Markup {
    pub fn total(&self) -> Decimal {
        self.indirect_costs + self.taxes_total + self.profit
    }
}

/// Aplica custos indiretos, tributos e lucro sobre o subtotal.
///
/// Convenção (cálculo "por dentro" dos tributos):
/// 1. custos indiretos = subtotal x percentual;
/// 2. tributos resolvidos de trás para frente sobre a base (subtotal +
///    indiretos), de modo que cada tributo seja a sua alíquota do preço
///    com tributos: tributo = base x aliquota / (1 - soma das aliquotas);
/// 3. lucro = markup direto sobre (subtotal + indiretos + tributos);
/// 4. total do contrato = subtotal + indiretos + tributos + lucro.
///
/// Viabilidade: alíquotas somando 100% (ou tributos + lucro chegando a
/// 100%) não têm preço finito — erro de domínio antes de qualquer divisão,
/// nunca divisão por zero ou denominador negativo.
pub fn apply(subtotal: Decimal, params: &ParameterSet) -> Result<Markup, AppError> {
    let tax_fraction = as_fraction(params.aliquota_tributos_total());
    let profit_fraction = as_fraction(params.lucro_percentual);

    if tax_fraction >= Decimal::ONE || tax_fraction + profit_fraction >= Decimal::ONE {
        return Err(AppError::InfeasiblePricing);
    }

    let indirect_costs = subtotal * as_fraction(params.custos_indiretos_percentual);
    let tax_base = subtotal + indirect_costs;
    let denominator = Decimal::ONE - tax_fraction;

    let (taxes_total, tax_detail) = match params.regime_tributario {
        TaxRegime::Simples => {
            let amount = tax_base * tax_fraction / denominator;
            let detail = TaxDetail::Simples {
                rate: params.aliquota_simples,
                amount: round_half_up(amount),
            };
            (amount, detail)
        }
        TaxRegime::LucroPresumido | TaxRegime::Outro => {
            let pis = tax_base * as_fraction(params.aliquota_pis) / denominator;
            let cofins = tax_base * as_fraction(params.aliquota_cofins) / denominator;
            let iss = tax_base * as_fraction(params.aliquota_iss) / denominator;
            let detail = TaxDetail::Itemized {
                pis: round_half_up(pis),
                cofins: round_half_up(cofins),
                iss: round_half_up(iss),
            };
            (pis + cofins + iss, detail)
        }
    };

    let profit = (tax_base + taxes_total) * profit_fraction;

    Ok(Markup {
        indirect_costs,
        taxes_total,
        profit,
        tax_detail,
    })
}
