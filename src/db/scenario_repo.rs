// src/db/scenario_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::params::{ParameterSet, TaxRegime},
    models::scenario::{
        CustomExpense, ExpenseCategory, Lot, Scenario, ScenarioSummary, ShiftType, SupplyCategory,
        SupplyItem, WorkPost,
    },
};

// Consultas em tempo de execução (sem os macros `query_as!`): o esquema é
// garantido pelas migrações, e o crate compila sem um banco disponível.

#[derive(Clone)]
pub struct ScenarioRepository {
    pool: PgPool,
}

// --- Linhas intermediárias (FromRow) ---

#[derive(sqlx::FromRow)]
struct ScenarioHeaderRow {
    id: Uuid,
    name: String,
    service_type: Option<String>,
    inss_patronal: Decimal,
    salario_educacao: Decimal,
    rat_sat: Decimal,
    fap_multiplicador: Decimal,
    sesc_senac: Decimal,
    sebrae: Decimal,
    incra: Decimal,
    fgts: Decimal,
    provisao_decimo_terceiro: Decimal,
    provisao_ferias: Decimal,
    provisao_rescisao: Decimal,
    provisao_ausencias: Decimal,
    reposicao_percentual: Decimal,
    regime: TaxRegime,
    aliquota_simples: Decimal,
    aliquota_pis: Decimal,
    aliquota_cofins: Decimal,
    aliquota_iss: Decimal,
    custos_indiretos_percentual: Decimal,
    lucro_percentual: Decimal,
}

#[derive(sqlx::FromRow)]
struct LotRow {
    lot_number: i32,
    name: String,
}

#[derive(sqlx::FromRow)]
struct PostRow {
    lot_number: i32,
    role_name: String,
    headcount: i32,
    shift: ShiftType,
    base_wage: Decimal,
    unhealthy_premium: Decimal,
    hazard_premium: Decimal,
    night_shift_pct: Decimal,
    bonus: Decimal,
}

#[derive(sqlx::FromRow)]
struct SupplyRow {
    lot_number: i32,
    category: SupplyCategory,
    description: String,
    unit_cost: Decimal,
    qty_per_post: Decimal,
    replacement_months: i32,
    role_filter: String,
}

#[derive(sqlx::FromRow)]
struct ExpenseRow {
    lot_number: i32,
    category: ExpenseCategory,
    description: String,
    unit: String,
    quantity: Decimal,
    unit_value: Decimal,
}

impl ScenarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Salva o cenário completo em uma transação.
    /// Identificador presente => atualização (filhos são substituídos);
    /// ausente => criação. Retorna o id do cenário.
    pub async fn save(&self, scenario: &Scenario, total_value: Decimal) -> Result<Uuid, AppError> {
        let mut tx = self.pool.begin().await?;
        let p = &scenario.params;

        let scenario_id = match scenario.id {
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE scenarios SET
                        name = $1, service_type = $2, total_value = $3,
                        inss_patronal = $4, salario_educacao = $5, rat_sat = $6,
                        fap_multiplicador = $7, sesc_senac = $8, sebrae = $9,
                        incra = $10, fgts = $11,
                        provisao_decimo_terceiro = $12, provisao_ferias = $13,
                        provisao_rescisao = $14, provisao_ausencias = $15,
                        reposicao_percentual = $16,
                        regime = $17, aliquota_simples = $18, aliquota_pis = $19,
                        aliquota_cofins = $20, aliquota_iss = $21,
                        custos_indiretos_percentual = $22, lucro_percentual = $23,
                        updated_at = now()
                    WHERE id = $24
                    "#,
                )
                .bind(&scenario.name)
                .bind(&scenario.service_type)
                .bind(total_value)
                .bind(p.inss_patronal)
                .bind(p.salario_educacao)
                .bind(p.rat_sat)
                .bind(p.fap_multiplicador)
                .bind(p.sesc_senac)
                .bind(p.sebrae)
                .bind(p.incra)
                .bind(p.fgts)
                .bind(p.provisao_decimo_terceiro)
                .bind(p.provisao_ferias)
                .bind(p.provisao_rescisao)
                .bind(p.provisao_ausencias)
                .bind(p.reposicao_percentual)
                .bind(p.regime_tributario)
                .bind(p.aliquota_simples)
                .bind(p.aliquota_pis)
                .bind(p.aliquota_cofins)
                .bind(p.aliquota_iss)
                .bind(p.custos_indiretos_percentual)
                .bind(p.lucro_percentual)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::ScenarioNotFound);
                }

                // Edição substitui todos os filhos do cenário.
                for table in ["scenario_lots", "scenario_posts", "scenario_supplies", "scenario_expenses"] {
                    sqlx::query(&format!("DELETE FROM {} WHERE scenario_id = $1", table))
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                }

                id
            }
            None => {
                let (id,): (Uuid,) = sqlx::query_as(
                    r#"
                    INSERT INTO scenarios (
                        name, service_type, total_value,
                        inss_patronal, salario_educacao, rat_sat, fap_multiplicador,
                        sesc_senac, sebrae, incra, fgts,
                        provisao_decimo_terceiro, provisao_ferias,
                        provisao_rescisao, provisao_ausencias, reposicao_percentual,
                        regime, aliquota_simples, aliquota_pis, aliquota_cofins,
                        aliquota_iss, custos_indiretos_percentual, lucro_percentual
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                            $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23)
                    RETURNING id
                    "#,
                )
                .bind(&scenario.name)
                .bind(&scenario.service_type)
                .bind(total_value)
                .bind(p.inss_patronal)
                .bind(p.salario_educacao)
                .bind(p.rat_sat)
                .bind(p.fap_multiplicador)
                .bind(p.sesc_senac)
                .bind(p.sebrae)
                .bind(p.incra)
                .bind(p.fgts)
                .bind(p.provisao_decimo_terceiro)
                .bind(p.provisao_ferias)
                .bind(p.provisao_rescisao)
                .bind(p.provisao_ausencias)
                .bind(p.reposicao_percentual)
                .bind(p.regime_tributario)
                .bind(p.aliquota_simples)
                .bind(p.aliquota_pis)
                .bind(p.aliquota_cofins)
                .bind(p.aliquota_iss)
                .bind(p.custos_indiretos_percentual)
                .bind(p.lucro_percentual)
                .fetch_one(&mut *tx)
                .await?;

                id
            }
        };

        for lot in &scenario.lots {
            sqlx::query(
                "INSERT INTO scenario_lots (scenario_id, lot_number, name) VALUES ($1, $2, $3)",
            )
            .bind(scenario_id)
            .bind(lot.number)
            .bind(&lot.name)
            .execute(&mut *tx)
            .await?;

            for (position, post) in lot.posts.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO scenario_posts (
                        scenario_id, lot_number, role_name, headcount, shift,
                        base_wage, unhealthy_premium, hazard_premium,
                        night_shift_pct, bonus, position
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(scenario_id)
                .bind(lot.number)
                .bind(&post.role)
                .bind(post.headcount)
                .bind(post.shift)
                .bind(post.base_wage)
                .bind(post.unhealthy_premium)
                .bind(post.hazard_premium)
                .bind(post.night_shift_pct)
                .bind(post.bonus)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }

            for (position, item) in lot.supplies.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO scenario_supplies (
                        scenario_id, lot_number, category, description,
                        unit_cost, qty_per_post, replacement_months, role_filter, position
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    "#,
                )
                .bind(scenario_id)
                .bind(lot.number)
                .bind(item.category)
                .bind(&item.description)
                .bind(item.unit_cost)
                .bind(item.qty_per_post)
                .bind(item.replacement_months)
                .bind(&item.role_filter)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        for (position, expense) in scenario.expenses.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO scenario_expenses (
                    scenario_id, lot_number, category, description,
                    unit, quantity, unit_value, position
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(scenario_id)
            .bind(expense.lot_number)
            .bind(expense.category)
            .bind(&expense.description)
            .bind(&expense.unit)
            .bind(expense.quantity)
            .bind(expense.unit_value)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(scenario_id)
    }

    /// Carrega o cenário completo (parâmetros + lotes + despesas) para
    /// reconstruir o estado editável. Lotes saem em ordem crescente.
    pub async fn load(&self, id: Uuid) -> Result<Scenario, AppError> {
        let header: ScenarioHeaderRow = sqlx::query_as("SELECT * FROM scenarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ScenarioNotFound)?;

        let lot_rows: Vec<LotRow> = sqlx::query_as(
            "SELECT lot_number, name FROM scenario_lots WHERE scenario_id = $1 ORDER BY lot_number",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let post_rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT lot_number, role_name, headcount, shift, base_wage,
                   unhealthy_premium, hazard_premium, night_shift_pct, bonus
            FROM scenario_posts WHERE scenario_id = $1
            ORDER BY lot_number, position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let supply_rows: Vec<SupplyRow> = sqlx::query_as(
            r#"
            SELECT lot_number, category, description, unit_cost,
                   qty_per_post, replacement_months, role_filter
            FROM scenario_supplies WHERE scenario_id = $1
            ORDER BY lot_number, position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let expense_rows: Vec<ExpenseRow> = sqlx::query_as(
            r#"
            SELECT lot_number, category, description, unit, quantity, unit_value
            FROM scenario_expenses WHERE scenario_id = $1
            ORDER BY lot_number, position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let lots = lot_rows
            .into_iter()
            .map(|lot| Lot {
                number: lot.lot_number,
                name: lot.name,
                posts: post_rows
                    .iter()
                    .filter(|r| r.lot_number == lot.lot_number)
                    .map(|r| WorkPost {
                        role: r.role_name.clone(),
                        headcount: r.headcount,
                        shift: r.shift,
                        base_wage: r.base_wage,
                        unhealthy_premium: r.unhealthy_premium,
                        hazard_premium: r.hazard_premium,
                        night_shift_pct: r.night_shift_pct,
                        bonus: r.bonus,
                    })
                    .collect(),
                supplies: supply_rows
                    .iter()
                    .filter(|r| r.lot_number == lot.lot_number)
                    .map(|r| SupplyItem {
                        category: r.category,
                        description: r.description.clone(),
                        unit_cost: r.unit_cost,
                        qty_per_post: r.qty_per_post,
                        replacement_months: r.replacement_months,
                        role_filter: r.role_filter.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Scenario {
            id: Some(header.id),
            name: header.name,
            service_type: header.service_type,
            params: ParameterSet {
                inss_patronal: header.inss_patronal,
                salario_educacao: header.salario_educacao,
                rat_sat: header.rat_sat,
                fap_multiplicador: header.fap_multiplicador,
                sesc_senac: header.sesc_senac,
                sebrae: header.sebrae,
                incra: header.incra,
                fgts: header.fgts,
                provisao_decimo_terceiro: header.provisao_decimo_terceiro,
                provisao_ferias: header.provisao_ferias,
                provisao_rescisao: header.provisao_rescisao,
                provisao_ausencias: header.provisao_ausencias,
                reposicao_percentual: header.reposicao_percentual,
                regime_tributario: header.regime,
                aliquota_simples: header.aliquota_simples,
                aliquota_pis: header.aliquota_pis,
                aliquota_cofins: header.aliquota_cofins,
                aliquota_iss: header.aliquota_iss,
                custos_indiretos_percentual: header.custos_indiretos_percentual,
                lucro_percentual: header.lucro_percentual,
            },
            lots,
            expenses: expense_rows
                .into_iter()
                .map(|r| CustomExpense {
                    lot_number: r.lot_number,
                    category: r.category,
                    description: r.description,
                    unit: r.unit,
                    quantity: r.quantity,
                    unit_value: r.unit_value,
                })
                .collect(),
        })
    }

    pub async fn list(&self) -> Result<Vec<ScenarioSummary>, AppError> {
        let summaries = sqlx::query_as::<_, ScenarioSummary>(
            r#"
            SELECT id, name, service_type, total_value, updated_at
            FROM scenarios
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM scenarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ScenarioNotFound);
        }
        Ok(())
    }
}
