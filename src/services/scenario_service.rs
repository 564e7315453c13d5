// src/services/scenario_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ScenarioRepository,
    engine,
    models::scenario::{Scenario, ScenarioSummary},
};

#[derive(Clone)]
pub struct ScenarioService {
    repo: ScenarioRepository,
}

impl ScenarioService {
    pub fn new(repo: ScenarioRepository) -> Self {
        Self { repo }
    }

    /// Salva (cria ou atualiza) um cenário completo.
    ///
    /// Recalcula o resultado v3 antes de persistir: isso valida o cenário
    /// inteiro e produz o total geral cacheado no registro para a listagem.
    /// O resultado em si nunca é persistido; é derivado das entradas.
    pub async fn save(&self, scenario: &Scenario) -> Result<Uuid, AppError> {
        let result = engine::preview_v3(scenario)?;
        let id = self.repo.save(scenario, result.grand_total).await?;

        tracing::info!(
            cenario_id = %id,
            total = %result.grand_total,
            "Cenário salvo"
        );
        Ok(id)
    }

    /// Carrega o cenário completo para reconstruir o estado editável.
    pub async fn load(&self, id: Uuid) -> Result<Scenario, AppError> {
        self.repo.load(id).await
    }

    pub async fn list(&self) -> Result<Vec<ScenarioSummary>, AppError> {
        self.repo.list().await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        tracing::info!(cenario_id = %id, "Cenário excluído");
        Ok(())
    }
}
