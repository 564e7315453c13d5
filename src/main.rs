//src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use precifica::{config::AppState, docs::ApiDoc, handlers};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de cálculo: puras, sem banco
    let pricing_routes = Router::new()
        .route("/preview", post(handlers::pricing::preview))
        .route("/preview-v3", post(handlers::pricing::preview_v3))
        .route("/presets", get(handlers::pricing::presets));

    // Rotas de cenários salvos
    let scenario_routes = Router::new()
        .route(
            "/",
            post(handlers::scenarios::save_scenario).get(handlers::scenarios::list_scenarios),
        )
        .route(
            "/{id}",
            get(handlers::scenarios::get_scenario).delete(handlers::scenarios::delete_scenario),
        )
        .route("/{id}/pdf", get(handlers::scenarios::export_pdf))
        .route("/{id}/xlsx", get(handlers::scenarios::export_xlsx));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/precificacao", pricing_routes)
        .nest("/api/cenarios", scenario_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
