// src/engine/pricing.rs

use rust_decimal::Decimal;
use validator::Validate;

use crate::common::error::AppError;
use crate::engine::{citl, expenses, labor, round_half_up};
use crate::models::result::{
    ExpenseBreakdown, LaborBreakdown, LotTotal, MarkupBreakdown, PricingResult,
};
use crate::models::scenario::Scenario;

/// As duas variantes do motor expostas pela API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineVariant {
    /// Variante legada: só mão de obra e insumos; despesas livres ignoradas.
    Legacy,
    /// Variante v3: subtotal legado + despesas livres.
    V3,
}

/// Executa o cálculo completo de um cenário.
///
/// Valida tudo antes de calcular (nunca computa parcialmente), percorre os
/// lotes em ordem numérica crescente e devolve o detalhamento completo.
/// Função pura: mesma entrada, mesmo resultado.
pub fn calculate(scenario: &Scenario, variant: EngineVariant) -> Result<PricingResult, AppError> {
    scenario.validate()?;
    scenario.validate_consistency()?;

    let sorted = scenario.sorted_lots();
    let labor_totals = labor::aggregate(&sorted, &scenario.params)?;

    let (expense_breakdown, expense_raw_total) = match variant {
        EngineVariant::Legacy => (
            ExpenseBreakdown {
                groups: Vec::new(),
                total: Decimal::ZERO,
            },
            Decimal::ZERO,
        ),
        EngineVariant::V3 => expenses::aggregate(&scenario.expenses),
    };

    // Subtotal antes do CITL: definição consistente entre as variantes
    // (v3 = legado + despesas livres).
    let subtotal = labor_totals.total() + expense_raw_total;

    let markup = citl::apply(subtotal, &scenario.params)?;
    let grand_total = subtotal + markup.total();

    // Custo direto por lote: mão de obra + insumos do lote, mais as
    // despesas livres do lote na variante v3.
    let lots = sorted
        .iter()
        .map(|lot| {
            let labor_part = labor_totals
                .lot_totals
                .iter()
                .find(|(n, _)| *n == lot.number)
                .map(|(_, v)| *v)
                .unwrap_or(Decimal::ZERO);
            let expense_part = match variant {
                EngineVariant::Legacy => Decimal::ZERO,
                EngineVariant::V3 => scenario
                    .expenses
                    .iter()
                    .filter(|e| e.lot_number == lot.number)
                    .map(|e| e.quantity * e.unit_value)
                    .sum(),
            };
            LotTotal {
                number: lot.number,
                name: lot.name.clone(),
                total: round_half_up(labor_part + expense_part),
            }
        })
        .collect();

    Ok(PricingResult {
        labor: LaborBreakdown {
            remuneration: round_half_up(labor_totals.remuneration),
            payroll_charges: round_half_up(labor_totals.payroll_charges),
            provisions: round_half_up(labor_totals.provisions),
            replacement_reserve: round_half_up(labor_totals.replacement_reserve),
            supplies: round_half_up(labor_totals.supplies),
            total: round_half_up(labor_totals.total()),
            posts: labor_totals.posts,
        },
        expenses: expense_breakdown,
        lots,
        subtotal_before_markup: round_half_up(subtotal),
        markup: MarkupBreakdown {
            indirect_costs: round_half_up(markup.indirect_costs),
            taxes: markup.tax_detail.clone(),
            taxes_total: round_half_up(markup.taxes_total),
            profit: round_half_up(markup.profit),
            total: round_half_up(markup.total()),
        },
        grand_total: round_half_up(grand_total),
    })
}

/// Variante legada exposta em `/api/precificacao/preview`.
pub fn preview(scenario: &Scenario) -> Result<PricingResult, AppError> {
    calculate(scenario, EngineVariant::Legacy)
}

/// Variante v3 exposta em `/api/precificacao/preview-v3`.
pub fn preview_v3(scenario: &Scenario) -> Result<PricingResult, AppError> {
    calculate(scenario, EngineVariant::V3)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::params::ParameterSet;
    use crate::models::scenario::{CustomExpense, ExpenseCategory, Lot, ShiftType, WorkPost};

    fn cenario_basico() -> Scenario {
        Scenario {
            id: None,
            name: "Portaria".into(),
            service_type: Some("Portaria".into()),
            params: ParameterSet::default(),
            lots: vec![Lot {
                number: 1,
                name: "Lote 1".into(),
                posts: vec![WorkPost {
                    role: "Porteiro".into(),
                    headcount: 1,
                    shift: ShiftType::Horas44,
                    base_wage: dec!(1500),
                    unhealthy_premium: Decimal::ZERO,
                    hazard_premium: Decimal::ZERO,
                    night_shift_pct: dec!(20),
                    bonus: Decimal::ZERO,
                }],
                supplies: vec![],
            }],
            expenses: vec![],
        }
    }

    #[test]
    fn v3_soma_despesas_no_subtotal_legado() {
        let mut cenario = cenario_basico();
        cenario.expenses.push(CustomExpense {
            lot_number: 1,
            category: ExpenseCategory::Veiculo,
            description: "Locação de utilitário".into(),
            unit: "mês".into(),
            quantity: dec!(1),
            unit_value: dec!(1000),
        });

        let legado = preview(&cenario).unwrap();
        let v3 = preview_v3(&cenario).unwrap();

        assert_eq!(
            v3.subtotal_before_markup,
            legado.subtotal_before_markup + dec!(1000)
        );
        assert_eq!(legado.expenses.total, Decimal::ZERO);
        assert_eq!(v3.expenses.total, dec!(1000));
    }

    #[test]
    fn cenario_vazio_calcula_zero_sem_erro() {
        let cenario = Scenario {
            id: None,
            name: "Vazio".into(),
            service_type: None,
            params: ParameterSet::zeroed(),
            lots: vec![],
            expenses: vec![],
        };

        let resultado = preview_v3(&cenario).unwrap();
        assert_eq!(resultado.subtotal_before_markup, Decimal::ZERO);
        assert_eq!(resultado.markup.indirect_costs, Decimal::ZERO);
        assert_eq!(resultado.grand_total, Decimal::ZERO);
    }

    #[test]
    fn validacao_barra_cenario_antes_do_calculo() {
        let mut cenario = cenario_basico();
        cenario.lots[0].posts[0].base_wage = dec!(-1);

        assert!(matches!(
            preview(&cenario),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn despesa_de_lote_inexistente_nao_entra_no_subtotal_sem_lote() {
        // Um número de lote órfão inflaria o subtotal sem aparecer em
        // nenhum total de lote; a validação barra antes do cálculo.
        let mut cenario = cenario_basico();
        cenario.expenses.push(CustomExpense {
            lot_number: 7,
            category: ExpenseCategory::Veiculo,
            description: "Locação de utilitário".into(),
            unit: "mês".into(),
            quantity: dec!(1),
            unit_value: dec!(1000),
        });

        assert!(matches!(
            preview_v3(&cenario),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn totais_por_lote_somam_o_subtotal_direto() {
        let mut cenario = cenario_basico();
        let mut lote_2 = cenario.lots[0].clone();
        lote_2.number = 2;
        lote_2.name = "Lote 2".into();
        lote_2.posts[0].base_wage = dec!(2000);
        cenario.lots.push(lote_2);
        cenario.expenses.push(CustomExpense {
            lot_number: 2,
            category: ExpenseCategory::Operacional,
            description: "Material de escritório".into(),
            unit: "un".into(),
            quantity: dec!(2),
            unit_value: dec!(150),
        });

        let resultado = preview_v3(&cenario).unwrap();
        let soma: Decimal = resultado.lots.iter().map(|l| l.total).sum();
        assert_eq!(soma, resultado.subtotal_before_markup);
    }

    #[test]
    fn lotes_saem_em_ordem_crescente() {
        let mut cenario = cenario_basico();
        let mut lote_3 = cenario.lots[0].clone();
        lote_3.number = 3;
        lote_3.name = "Lote 3".into();
        let mut lote_2 = cenario.lots[0].clone();
        lote_2.number = 2;
        lote_2.name = "Lote 2".into();
        cenario.lots = vec![lote_3, cenario.lots[0].clone(), lote_2];

        let resultado = preview(&cenario).unwrap();
        let ordem: Vec<i32> = resultado.lots.iter().map(|l| l.number).collect();
        assert_eq!(ordem, vec![1, 2, 3]);
    }
}
