// tests/scenario_roundtrip.rs
//
// O cenário é o contrato de ida e volta com o frontend: o que sai num GET
// precisa reconstruir exatamente o estado editável que entrou no POST.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use precifica::models::{
    ParameterSet, TaxRegime,
    scenario::{
        CustomExpense, ExpenseCategory, Lot, Scenario, ShiftType, SupplyCategory, SupplyItem,
        WorkPost,
    },
};

fn cenario_completo() -> Scenario {
    Scenario {
        id: Some(Uuid::from_u128(7)),
        name: "Portaria Fórum Central".into(),
        service_type: Some("Portaria".into()),
        params: ParameterSet {
            regime_tributario: TaxRegime::LucroPresumido,
            fap_multiplicador: dec!(1.5),
            lucro_percentual: dec!(7.2),
            ..ParameterSet::default()
        },
        lots: vec![
            Lot {
                number: 2,
                name: "Lote 2".into(),
                posts: vec![WorkPost {
                    role: "Zelador".into(),
                    headcount: 1,
                    shift: ShiftType::Horas44,
                    base_wage: dec!(1600),
                    unhealthy_premium: Decimal::ZERO,
                    hazard_premium: dec!(480),
                    night_shift_pct: dec!(20),
                    bonus: Decimal::ZERO,
                }],
                supplies: vec![],
            },
            Lot {
                number: 1,
                name: "Lote 1".into(),
                posts: vec![WorkPost {
                    role: "Porteiro".into(),
                    headcount: 2,
                    shift: ShiftType::Noturno12x36,
                    base_wage: dec!(1500),
                    unhealthy_premium: Decimal::ZERO,
                    hazard_premium: Decimal::ZERO,
                    night_shift_pct: dec!(20),
                    bonus: dec!(100),
                }],
                supplies: vec![SupplyItem {
                    category: SupplyCategory::Uniforme,
                    description: "Uniforme completo".into(),
                    unit_cost: dec!(150),
                    qty_per_post: dec!(2),
                    replacement_months: 6,
                    role_filter: "todos".into(),
                }],
            },
        ],
        expenses: vec![CustomExpense {
            lot_number: 1,
            category: ExpenseCategory::Veiculo,
            description: "Locação de utilitário".into(),
            unit: "mês".into(),
            quantity: dec!(1),
            unit_value: dec!(2500),
        }],
    }
}

#[test]
fn cenario_sobrevive_ao_json_campo_a_campo() {
    let original = cenario_completo();

    let json = serde_json::to_string(&original).unwrap();
    let reconstruido: Scenario = serde_json::from_str(&json).unwrap();

    assert_eq!(reconstruido, original);
}

#[test]
fn o_json_usa_camel_case_na_fronteira() {
    let json = serde_json::to_value(cenario_completo()).unwrap();

    assert!(json.get("serviceType").is_some());
    assert_eq!(json["params"]["regimeTributario"], "lucro_presumido");
    let post = &json["lots"][0]["posts"][0];
    assert!(post.get("baseWage").is_some());
    assert!(post.get("base_wage").is_none());
}

#[test]
fn id_ausente_fica_fora_do_json() {
    let mut cenario = cenario_completo();
    cenario.id = None;

    let json = serde_json::to_value(&cenario).unwrap();
    assert!(json.get("id").is_none());
}

#[test]
fn resultado_carrega_o_detalhe_de_tributos_etiquetado() {
    // O regime detalhado sai como objeto etiquetado, nunca um número solto.
    let resultado = precifica::engine::preview_v3(&cenario_completo()).unwrap();

    let json = serde_json::to_value(&resultado).unwrap();
    let tributos = &json["markup"]["taxes"];
    assert_eq!(tributos["regime"], "detalhado");
    assert!(tributos.get("pis").is_some());
    assert!(tributos.get("cofins").is_some());
    assert!(tributos.get("iss").is_some());
}
