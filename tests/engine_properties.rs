// tests/engine_properties.rs
//
// Propriedades do motor de ponta a ponta, sobre cenários completos.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use precifica::common::error::AppError;
use precifica::engine;
use precifica::models::{
    ParameterSet,
    scenario::{
        CustomExpense, ExpenseCategory, Lot, Scenario, ShiftType, SupplyCategory, SupplyItem,
        WorkPost,
    },
};

fn posto(role: &str, headcount: i32, base_wage: Decimal) -> WorkPost {
    WorkPost {
        role: role.to_string(),
        headcount,
        shift: ShiftType::Horas44,
        base_wage,
        unhealthy_premium: Decimal::ZERO,
        hazard_premium: Decimal::ZERO,
        night_shift_pct: dec!(20),
        bonus: Decimal::ZERO,
    }
}

fn cenario(params: ParameterSet, lots: Vec<Lot>) -> Scenario {
    Scenario {
        id: None,
        name: "Teste".into(),
        service_type: None,
        params,
        lots,
        expenses: vec![],
    }
}

#[test]
fn caso_de_referencia_fecha_em_5443_20() {
    // 2 postos de R$ 2000, só INSS patronal 20%, indiretos 5%, lucro 8%:
    // remuneração 4000, encargos 800, subtotal 4800, indiretos 240,
    // lucro 403.20, total 5443.20.
    let params = ParameterSet {
        inss_patronal: dec!(20),
        custos_indiretos_percentual: dec!(5),
        lucro_percentual: dec!(8),
        ..ParameterSet::zeroed()
    };
    let cenario = cenario(
        params,
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![posto("Vigia", 2, dec!(2000))],
            supplies: vec![],
        }],
    );

    let resultado = engine::preview(&cenario).unwrap();
    assert_eq!(resultado.labor.remuneration, dec!(4000.00));
    assert_eq!(resultado.labor.payroll_charges, dec!(800.00));
    assert_eq!(resultado.subtotal_before_markup, dec!(4800.00));
    assert_eq!(resultado.markup.indirect_costs, dec!(240.00));
    assert_eq!(resultado.markup.taxes_total, dec!(0.00));
    assert_eq!(resultado.markup.profit, dec!(403.20));
    assert_eq!(resultado.grand_total, dec!(5443.20));
}

#[test]
fn encargos_sao_exatamente_a_aliquota_quando_so_o_inss_incide() {
    let params = ParameterSet {
        inss_patronal: dec!(20),
        ..ParameterSet::zeroed()
    };
    let cenario = cenario(
        params,
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![posto("Vigia", 3, dec!(1700))],
            supplies: vec![],
        }],
    );

    let resultado = engine::preview(&cenario).unwrap();
    assert_eq!(
        resultado.labor.payroll_charges,
        resultado.labor.remuneration * dec!(0.20)
    );
}

#[test]
fn dobrar_a_quantidade_dobra_o_total_sem_despesas_fixas() {
    // Alíquotas que terminam em 2 casas, para a comparação exata pós-
    // arredondamento valer.
    let params = ParameterSet {
        inss_patronal: dec!(20),
        custos_indiretos_percentual: dec!(5),
        lucro_percentual: dec!(8),
        ..ParameterSet::zeroed()
    };
    let base = cenario(
        params,
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![posto("Porteiro", 1, dec!(1500))],
            supplies: vec![SupplyItem {
                category: SupplyCategory::Uniforme,
                description: "Uniforme".into(),
                unit_cost: dec!(150),
                qty_per_post: dec!(2),
                replacement_months: 6,
                role_filter: "todos".into(),
            }],
        }],
    );
    let mut dobrado = base.clone();
    dobrado.lots[0].posts[0].headcount = 2;

    let r1 = engine::preview(&base).unwrap();
    let r2 = engine::preview(&dobrado).unwrap();
    assert_eq!(r2.grand_total, r1.grand_total * dec!(2));
}

#[test]
fn insumo_amortizado_entra_no_custo_mensal() {
    // 150 x 2 / 6 = 50 por posto por mês, sem encargos nem markup.
    let cenario = cenario(
        ParameterSet::zeroed(),
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![posto("Porteiro", 1, dec!(1500))],
            supplies: vec![SupplyItem {
                category: SupplyCategory::Uniforme,
                description: "Uniforme".into(),
                unit_cost: dec!(150),
                qty_per_post: dec!(2),
                replacement_months: 6,
                role_filter: "todos".into(),
            }],
        }],
    );

    let resultado = engine::preview(&cenario).unwrap();
    assert_eq!(resultado.labor.supplies, dec!(50.00));
    assert_eq!(resultado.grand_total, dec!(1550.00));
}

#[test]
fn insumo_com_filtro_de_cargo_so_incide_no_cargo() {
    let cenario = cenario(
        ParameterSet::zeroed(),
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![posto("Porteiro", 1, dec!(1500)), posto("Zelador", 1, dec!(1600))],
            supplies: vec![SupplyItem {
                category: SupplyCategory::Epi,
                description: "Botas".into(),
                unit_cost: dec!(60),
                qty_per_post: dec!(1),
                replacement_months: 3,
                role_filter: "Zelador".into(),
            }],
        }],
    );

    let resultado = engine::preview(&cenario).unwrap();
    // 60 / 3 = 20, só no zelador.
    assert_eq!(resultado.labor.supplies, dec!(20.00));
    let porteiro = &resultado.labor.posts[0];
    let zelador = &resultado.labor.posts[1];
    assert_eq!(porteiro.supplies, dec!(0.00));
    assert_eq!(zelador.supplies, dec!(20.00));
}

#[test]
fn despesas_livres_nao_recebem_encargos_mas_recebem_markup() {
    // Encargos altos, uma única despesa livre, nenhum posto: os encargos
    // não podem tocar a despesa, mas os indiretos sim.
    let params = ParameterSet {
        inss_patronal: dec!(20),
        fgts: dec!(8),
        custos_indiretos_percentual: dec!(10),
        ..ParameterSet::zeroed()
    };
    let mut cenario = cenario(
        params,
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![],
            supplies: vec![],
        }],
    );
    cenario.expenses.push(CustomExpense {
        lot_number: 1,
        category: ExpenseCategory::Veiculo,
        description: "Locação de veículo".into(),
        unit: "mês".into(),
        quantity: dec!(1),
        unit_value: dec!(2000),
    });

    let resultado = engine::preview_v3(&cenario).unwrap();
    assert_eq!(resultado.labor.payroll_charges, dec!(0.00));
    assert_eq!(resultado.subtotal_before_markup, dec!(2000.00));
    assert_eq!(resultado.markup.indirect_costs, dec!(200.00));
}

#[test]
fn markup_estritamente_positivo_quando_ha_subtotal_e_aliquotas() {
    let resultado = engine::preview(&cenario(
        ParameterSet::default(),
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![posto("Porteiro", 1, dec!(1500))],
            supplies: vec![],
        }],
    ))
    .unwrap();

    assert!(resultado.markup.indirect_costs > Decimal::ZERO);
    assert!(resultado.markup.taxes_total > Decimal::ZERO);
    assert!(resultado.markup.profit > Decimal::ZERO);
    assert!(resultado.grand_total > resultado.subtotal_before_markup);
}

#[test]
fn aliquotas_inviaveis_retornam_erro_de_dominio() {
    let params = ParameterSet {
        aliquota_simples: dec!(92),
        lucro_percentual: dec!(8),
        ..ParameterSet::zeroed()
    };
    // Mesmo com subtotal zero o erro é reportado.
    let vazio = cenario(params, vec![]);

    assert!(matches!(
        engine::preview(&vazio),
        Err(AppError::InfeasiblePricing)
    ));
}

#[test]
fn periodicidade_zero_e_erro_de_validacao() {
    let mut c = cenario(
        ParameterSet::default(),
        vec![Lot {
            number: 1,
            name: "Lote 1".into(),
            posts: vec![posto("Porteiro", 1, dec!(1500))],
            supplies: vec![SupplyItem {
                category: SupplyCategory::Uniforme,
                description: "Uniforme".into(),
                unit_cost: dec!(150),
                qty_per_post: dec!(2),
                replacement_months: 6,
                role_filter: "todos".into(),
            }],
        }],
    );
    c.lots[0].supplies[0].replacement_months = 0;

    assert!(matches!(
        engine::preview(&c),
        Err(AppError::ValidationError(_))
    ));
}
