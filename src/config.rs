// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::ScenarioRepository,
    services::{ReportService, ScenarioService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub scenario_service: ScenarioService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let scenario_repo = ScenarioRepository::new(db_pool.clone());
        let scenario_service = ScenarioService::new(scenario_repo.clone());
        let report_service = ReportService::new(scenario_repo);

        Ok(Self {
            db_pool,
            scenario_service,
            report_service,
        })
    }
}
