// src/models/scenario.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::validation::{validate_not_negative, validate_percentual};
use crate::models::params::ParameterSet;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "jornada_tipo")]
pub enum ShiftType {
    #[serde(rename = "44h")]
    #[sqlx(rename = "44h")]
    Horas44,
    #[serde(rename = "40h")]
    #[sqlx(rename = "40h")]
    Horas40,
    #[serde(rename = "12x36_diurno")]
    #[sqlx(rename = "12x36_diurno")]
    Diurno12x36,
    #[serde(rename = "12x36_noturno")]
    #[sqlx(rename = "12x36_noturno")]
    Noturno12x36,
}

impl ShiftType {
    /// Só a jornada 12x36 noturna recebe o adicional noturno.
    pub fn is_night(&self) -> bool {
        matches!(self, ShiftType::Noturno12x36)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "insumo_tipo", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SupplyCategory {
    Uniforme,
    Epi,
    Material,
}

// Ord define a ordem de apresentação dos grupos no detalhamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "despesa_categoria", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    MaoObra,
    Material,
    Equipamento,
    Veiculo,
    Operacional,
    Administrativa,
    Bdi,
    Outra,
}

// --- Structs ---

/// Um posto de trabalho: uma posição de mão de obra com salário e adicionais.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkPost {
    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    #[schema(example = "Porteiro")]
    pub role: String,

    // Quantidade 0 é permitida: o posto simplesmente não contribui.
    #[validate(range(min = 0, message = "A quantidade de postos não pode ser negativa."))]
    #[schema(example = 2)]
    pub headcount: i32,

    pub shift: ShiftType,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "1500.00")]
    pub base_wage: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(example = "0.00")]
    pub unhealthy_premium: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(example = "0.00")]
    pub hazard_premium: Decimal,

    // Percentual sobre o salário base, aplicado apenas na jornada noturna.
    #[validate(custom(function = "validate_percentual"))]
    #[serde(default = "default_night_shift_pct")]
    #[schema(example = "20.0")]
    pub night_shift_pct: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(example = "0.00")]
    pub bonus: Decimal,
}

fn default_night_shift_pct() -> Decimal {
    Decimal::new(20, 0)
}

/// Um insumo recorrente (uniforme, EPI, material) amortizado ao mês.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplyItem {
    pub category: SupplyCategory,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    #[schema(example = "Uniforme completo (calça, camisa, sapato)")]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "150.00")]
    pub unit_cost: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "2")]
    pub qty_per_post: Decimal,

    // Guarda contra divisão por zero: a periodicidade nunca pode ser 0.
    #[validate(range(min = 1, message = "A periodicidade deve ser de pelo menos 1 mês."))]
    #[schema(example = 6)]
    pub replacement_months: i32,

    // "todos" aplica o insumo a todos os cargos do lote.
    #[serde(default = "default_role_filter")]
    #[schema(example = "todos")]
    pub role_filter: String,
}

fn default_role_filter() -> String {
    "todos".to_string()
}

/// Uma despesa livre, categorizada, sem interação com encargos de mão de obra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomExpense {
    #[validate(range(min = 1, message = "O número do lote deve ser positivo."))]
    #[schema(example = 1)]
    pub lot_number: i32,

    pub category: ExpenseCategory,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    #[schema(example = "Locação de veículo utilitário")]
    pub description: String,

    #[serde(default = "default_unit")]
    #[schema(example = "mês")]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "1")]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "2500.00")]
    pub unit_value: Decimal,
}

fn default_unit() -> String {
    "un".to_string()
}

/// Lote: agrupamento numerado de postos e insumos dentro de uma proposta.
/// A ordem de apresentação e soma é sempre a numérica crescente,
/// independente da ordem de inserção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    #[validate(range(min = 1, message = "O número do lote deve ser positivo."))]
    #[schema(example = 1)]
    pub number: i32,

    #[validate(length(min = 1, message = "O nome do lote é obrigatório."))]
    #[schema(example = "Lote 1")]
    pub name: String,

    #[validate(nested)]
    #[serde(default)]
    pub posts: Vec<WorkPost>,

    #[validate(nested)]
    #[serde(default)]
    pub supplies: Vec<SupplyItem>,
}

/// Cenário completo de precificação: o valor imutável que entra e sai de
/// cada chamada do motor. Nenhum estado ambiente participa do cálculo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    // Presente => atualização; ausente => criação (decisão do repositório).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "O nome do cenário é obrigatório."))]
    #[schema(example = "Portaria Fórum Central")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Portaria")]
    pub service_type: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub params: ParameterSet,

    #[validate(nested)]
    pub lots: Vec<Lot>,

    #[validate(nested)]
    #[serde(default)]
    pub expenses: Vec<CustomExpense>,
}

/// Linha da listagem de cenários salvos. O total geral é o valor cacheado
/// no último salvamento.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub id: Uuid,
    #[schema(example = "Portaria Fórum Central")]
    pub name: String,
    #[schema(example = "Portaria")]
    pub service_type: Option<String>,
    #[schema(example = "125430.18")]
    pub total_value: Decimal,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Scenario {
    /// Validação de consistência que o derive não cobre: números de lote
    /// únicos e despesas apontando para lotes existentes (uma despesa de
    /// lote órfão entraria no subtotal sem aparecer em nenhum total de
    /// lote).
    pub fn validate_consistency(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut numbers: Vec<i32> = self.lots.iter().map(|l| l.number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        if numbers.len() != self.lots.len() {
            let mut err = ValidationError::new("DuplicateLotNumber");
            err.message = Some("Números de lote devem ser únicos no cenário.".into());
            errors.add("lots", err);
        }

        for expense in &self.expenses {
            if !self.lots.iter().any(|l| l.number == expense.lot_number) {
                let mut err = ValidationError::new("UnknownExpenseLot");
                err.message = Some(
                    format!(
                        "A despesa '{}' referencia o lote {}, que não existe no cenário.",
                        expense.description, expense.lot_number
                    )
                    .into(),
                );
                errors.add("expenses", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Lotes em ordem numérica crescente, independente da ordem de inserção.
    pub fn sorted_lots(&self) -> Vec<&Lot> {
        let mut lots: Vec<&Lot> = self.lots.iter().collect();
        lots.sort_by_key(|l| l.number);
        lots
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn posto(role: &str) -> WorkPost {
        WorkPost {
            role: role.to_string(),
            headcount: 1,
            shift: ShiftType::Horas44,
            base_wage: dec!(1500),
            unhealthy_premium: Decimal::ZERO,
            hazard_premium: Decimal::ZERO,
            night_shift_pct: dec!(20),
            bonus: Decimal::ZERO,
        }
    }

    fn lote(number: i32) -> Lot {
        Lot {
            number,
            name: format!("Lote {}", number),
            posts: vec![posto("Porteiro")],
            supplies: vec![],
        }
    }

    #[test]
    fn salario_negativo_reprova_validacao() {
        let mut cenario = Scenario {
            id: None,
            name: "Teste".into(),
            service_type: None,
            params: ParameterSet::default(),
            lots: vec![lote(1)],
            expenses: vec![],
        };
        cenario.lots[0].posts[0].base_wage = dec!(-100);

        assert!(cenario.validate().is_err());
    }

    #[test]
    fn periodicidade_zero_reprova_validacao() {
        let mut cenario = Scenario {
            id: None,
            name: "Teste".into(),
            service_type: None,
            params: ParameterSet::default(),
            lots: vec![lote(1)],
            expenses: vec![],
        };
        cenario.lots[0].supplies.push(SupplyItem {
            category: SupplyCategory::Uniforme,
            description: "Uniforme".into(),
            unit_cost: dec!(150),
            qty_per_post: dec!(2),
            replacement_months: 0,
            role_filter: "todos".into(),
        });

        assert!(cenario.validate().is_err());
    }

    #[test]
    fn numeros_de_lote_duplicados_reprovam_consistencia() {
        let cenario = Scenario {
            id: None,
            name: "Teste".into(),
            service_type: None,
            params: ParameterSet::default(),
            lots: vec![lote(1), lote(1)],
            expenses: vec![],
        };

        assert!(cenario.validate_consistency().is_err());
    }

    #[test]
    fn despesa_de_lote_inexistente_reprova_consistencia() {
        let mut cenario = Scenario {
            id: None,
            name: "Teste".into(),
            service_type: None,
            params: ParameterSet::default(),
            lots: vec![lote(1)],
            expenses: vec![],
        };
        cenario.expenses.push(CustomExpense {
            lot_number: 99,
            category: ExpenseCategory::Veiculo,
            description: "Locação de utilitário".into(),
            unit: "mês".into(),
            quantity: dec!(1),
            unit_value: dec!(1000),
        });

        let errors = cenario.validate_consistency().unwrap_err();
        assert!(errors.errors().contains_key("expenses"));

        // Corrigindo o número do lote, a consistência volta a passar.
        cenario.expenses[0].lot_number = 1;
        assert!(cenario.validate_consistency().is_ok());
    }

    #[test]
    fn lotes_ordenados_por_numero_crescente() {
        let cenario = Scenario {
            id: None,
            name: "Teste".into(),
            service_type: None,
            params: ParameterSet::default(),
            lots: vec![lote(3), lote(1), lote(2)],
            expenses: vec![],
        };

        let ordem: Vec<i32> = cenario.sorted_lots().iter().map(|l| l.number).collect();
        assert_eq!(ordem, vec![1, 2, 3]);
    }

    #[test]
    fn deserializa_payload_com_defaults() {
        let json = r#"{
            "name": "Portaria",
            "lots": [{
                "number": 1,
                "name": "Lote 1",
                "posts": [{
                    "role": "Porteiro",
                    "headcount": 1,
                    "shift": "12x36_noturno",
                    "baseWage": 1500.0
                }]
            }]
        }"#;
        let cenario: Scenario = serde_json::from_str(json).unwrap();

        let post = &cenario.lots[0].posts[0];
        assert_eq!(post.shift, ShiftType::Noturno12x36);
        assert_eq!(post.night_shift_pct, dec!(20));
        assert_eq!(post.unhealthy_premium, Decimal::ZERO);
        assert_eq!(cenario.params, ParameterSet::default());
        assert!(cenario.expenses.is_empty());
    }
}
