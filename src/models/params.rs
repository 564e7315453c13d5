// src/models/params.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::{validate_not_negative, validate_percentual};

// --- Enums ---

// O regime decide qual bloco de alíquotas se aplica: `simples` usa a
// alíquota composta; os demais usam PIS + COFINS + ISS. Nunca os dois.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "regime_tributario", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    Simples,        // Simples Nacional - Anexo IV
    LucroPresumido, // Lucro Presumido
    Outro,          // Lucro Real e demais
}

// --- Structs ---

/// Parâmetros de encargos, provisões, tributos e margem de um cenário.
///
/// Todos os percentuais chegam na fronteira como números em [0, 100]
/// (percentual, não fração); o motor divide por 100 internamente.
/// Os defaults moram todos aqui: qualquer campo ausente no JSON assume o
/// valor de `Default::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSet {
    // --- Encargos sobre a remuneração ---
    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "20.0")]
    pub inss_patronal: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "2.5")]
    pub salario_educacao: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "3.0")]
    pub rat_sat: Decimal,

    // Multiplicador do RAT (FAP), fator e não percentual.
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "1.0")]
    pub fap_multiplicador: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "1.5")]
    pub sesc_senac: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "0.6")]
    pub sebrae: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "0.2")]
    pub incra: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "8.0")]
    pub fgts: Decimal,

    // --- Provisões (reserva sobre a remuneração) ---
    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "8.33")]
    pub provisao_decimo_terceiro: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "11.11")]
    pub provisao_ferias: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "5.0")]
    pub provisao_rescisao: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "2.0")]
    pub provisao_ausencias: Decimal,

    // Reserva para reposição de profissional ausente.
    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "3.0")]
    pub reposicao_percentual: Decimal,

    // --- Tributos ---
    pub regime_tributario: TaxRegime,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "14.0")]
    pub aliquota_simples: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "0.65")]
    pub aliquota_pis: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "3.0")]
    pub aliquota_cofins: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "5.0")]
    pub aliquota_iss: Decimal,

    // --- CITL/BDI ---
    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "5.0")]
    pub custos_indiretos_percentual: Decimal,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(example = "8.0")]
    pub lucro_percentual: Decimal,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            inss_patronal: Decimal::new(20, 0),
            salario_educacao: Decimal::new(25, 1),
            rat_sat: Decimal::new(3, 0),
            fap_multiplicador: Decimal::ONE,
            sesc_senac: Decimal::new(15, 1),
            sebrae: Decimal::new(6, 1),
            incra: Decimal::new(2, 1),
            fgts: Decimal::new(8, 0),
            provisao_decimo_terceiro: Decimal::new(833, 2),
            provisao_ferias: Decimal::new(1111, 2),
            provisao_rescisao: Decimal::new(5, 0),
            provisao_ausencias: Decimal::new(2, 0),
            reposicao_percentual: Decimal::new(3, 0),
            regime_tributario: TaxRegime::Simples,
            aliquota_simples: Decimal::new(14, 0),
            aliquota_pis: Decimal::new(65, 2),
            aliquota_cofins: Decimal::new(3, 0),
            aliquota_iss: Decimal::new(5, 0),
            custos_indiretos_percentual: Decimal::new(5, 0),
            lucro_percentual: Decimal::new(8, 0),
        }
    }
}

impl ParameterSet {
    /// Soma das alíquotas de tributos aplicáveis ao regime, em percentual.
    pub fn aliquota_tributos_total(&self) -> Decimal {
        match self.regime_tributario {
            TaxRegime::Simples => self.aliquota_simples,
            TaxRegime::LucroPresumido | TaxRegime::Outro => {
                self.aliquota_pis + self.aliquota_cofins + self.aliquota_iss
            }
        }
    }

    /// Parâmetros com todas as alíquotas e provisões zeradas.
    /// Útil em testes e como base para cenários totalmente manuais.
    pub fn zeroed() -> Self {
        Self {
            inss_patronal: Decimal::ZERO,
            salario_educacao: Decimal::ZERO,
            rat_sat: Decimal::ZERO,
            fap_multiplicador: Decimal::ONE,
            sesc_senac: Decimal::ZERO,
            sebrae: Decimal::ZERO,
            incra: Decimal::ZERO,
            fgts: Decimal::ZERO,
            provisao_decimo_terceiro: Decimal::ZERO,
            provisao_ferias: Decimal::ZERO,
            provisao_rescisao: Decimal::ZERO,
            provisao_ausencias: Decimal::ZERO,
            reposicao_percentual: Decimal::ZERO,
            regime_tributario: TaxRegime::Simples,
            aliquota_simples: Decimal::ZERO,
            aliquota_pis: Decimal::ZERO,
            aliquota_cofins: Decimal::ZERO,
            aliquota_iss: Decimal::ZERO,
            custos_indiretos_percentual: Decimal::ZERO,
            lucro_percentual: Decimal::ZERO,
        }
    }
}
