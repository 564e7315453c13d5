// src/engine/labor.rs

use rust_decimal::Decimal;

use crate::common::error::AppError;
use crate::engine::{as_fraction, round_half_up, supplies};
use crate::models::params::ParameterSet;
use crate::models::result::PostBreakdown;
use crate::models::scenario::{Lot, WorkPost};

/// Custos unitários (por posto, sem multiplicar pela quantidade) de um
/// posto de trabalho. Valores sem arredondamento.
#[derive(Debug, Clone, Copy)]
pub struct PostCosts {
    pub remuneration: Decimal,
    pub payroll_charges: Decimal,
    pub provisions: Decimal,
    pub replacement_reserve: Decimal,
}

impl PostCosts {
    pub fn total(&self) -> Decimal {
        self.remuneration + self.payroll_charges + self.provisions + self.replacement_reserve
    }
}

/// Remuneração unitária: salário base + insalubridade + periculosidade +
/// adicional noturno (percentual do salário base, só na jornada noturna) +
/// gratificação.
pub fn remuneration(post: &WorkPost) -> Decimal {
    let night_addition = if post.shift.is_night() {
        post.base_wage * as_fraction(post.night_shift_pct)
    } else {
        Decimal::ZERO
    };
    post.base_wage + post.unhealthy_premium + post.hazard_premium + night_addition + post.bonus
}

/// Módulos de custo de um posto. Cada alíquota incide de forma independente
/// sobre a remuneração (nunca composta), então todo custo é linear na
/// remuneração e, por consequência, na quantidade de postos.
pub fn post_costs(post: &WorkPost, params: &ParameterSet) -> PostCosts {
    let rem = remuneration(post);

    // Encargos: GPS (INSS patronal, salário-educação, RAT x FAP),
    // terceiros (SESC/SENAC, SEBRAE, INCRA) e FGTS.
    let charge_rate = params.inss_patronal
        + params.salario_educacao
        + params.rat_sat * params.fap_multiplicador
        + params.sesc_senac
        + params.sebrae
        + params.incra
        + params.fgts;

    // Provisões: 13º, férias + 1/3, rescisão e ausências legais.
    let provision_rate = params.provisao_decimo_terceiro
        + params.provisao_ferias
        + params.provisao_rescisao
        + params.provisao_ausencias;

    PostCosts {
        remuneration: rem,
        payroll_charges: rem * as_fraction(charge_rate),
        provisions: rem * as_fraction(provision_rate),
        replacement_reserve: rem * as_fraction(params.reposicao_percentual),
    }
}

/// Totais de mão de obra do cenário. Os campos agregados seguem sem
/// arredondar (entram no subtotal); `posts` e `lot_totals` carregam os
/// valores de apresentação, com os detalhes já arredondados.
#[derive(Debug, Clone)]
pub struct LaborTotals {
    pub remuneration: Decimal,
    pub payroll_charges: Decimal,
    pub provisions: Decimal,
    pub replacement_reserve: Decimal,
    pub supplies: Decimal,
    pub posts: Vec<PostBreakdown>,
    // Custo direto de mão de obra + insumos por lote, na ordem recebida.
    pub lot_totals: Vec<(i32, Decimal)>,
}

impl LaborTotals {
    pub fn total(&self) -> Decimal {
        self.remuneration + self.payroll_charges + self.provisions + self.replacement_reserve + self.supplies
    }
}

/// Agrega os lotes (já em ordem crescente) em totais de mão de obra.
///
/// Garantia: o total é a soma de cálculos idênticos por posto — somatório
/// comutativo, nenhuma interação entre postos. Quantidade 0 zera a
/// contribuição do posto sem erro.
pub fn aggregate(lots: &[&Lot], params: &ParameterSet) -> Result<LaborTotals, AppError> {
    let mut totals = LaborTotals {
        remuneration: Decimal::ZERO,
        payroll_charges: Decimal::ZERO,
        provisions: Decimal::ZERO,
        replacement_reserve: Decimal::ZERO,
        supplies: Decimal::ZERO,
        posts: Vec::new(),
        lot_totals: Vec::new(),
    };

    for lot in lots {
        let mut lot_total = Decimal::ZERO;

        for post in &lot.posts {
            let costs = post_costs(post, params);
            let supply_unit = supplies::monthly_cost_for_role(&post.role, &lot.supplies)?;
            let unit_total = costs.total() + supply_unit;
            let headcount = Decimal::from(post.headcount);

            totals.remuneration += costs.remuneration * headcount;
            totals.payroll_charges += costs.payroll_charges * headcount;
            totals.provisions += costs.provisions * headcount;
            totals.replacement_reserve += costs.replacement_reserve * headcount;
            totals.supplies += supply_unit * headcount;
            lot_total += unit_total * headcount;

            totals.posts.push(PostBreakdown {
                lot_number: lot.number,
                role: post.role.clone(),
                headcount: post.headcount,
                shift: post.shift,
                remuneration: round_half_up(costs.remuneration),
                payroll_charges: round_half_up(costs.payroll_charges),
                provisions: round_half_up(costs.provisions),
                replacement_reserve: round_half_up(costs.replacement_reserve),
                supplies: round_half_up(supply_unit),
                unit_total: round_half_up(unit_total),
                total: round_half_up(unit_total * headcount),
            });
        }

        totals.lot_totals.push((lot.number, lot_total));
    }

    Ok(totals)
}
