//src/main.rs

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod bootstrap;
mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Todo o estado é em memória: cada processo nasce com a loja semeada.
    bootstrap::seed(&app_state)
        .await
        .expect("Falha ao semear o estado inicial.");
    tracing::info!("✅ Estado inicial semeado com sucesso!");

    let inventory_routes = Router::new()
        .route(
            "/products",
            post(handlers::inventory::create_product).get(handlers::inventory::list_products),
        )
        .route(
            "/products/{id}",
            get(handlers::inventory::get_product)
                .put(handlers::inventory::update_product)
                .delete(handlers::inventory::delete_product),
        )
        .route("/products/{id}/restock", post(handlers::inventory::restock))
        .route("/products/{id}/transfer", post(handlers::inventory::transfer))
        .route("/products/{id}/loss", post(handlers::inventory::loss))
        .route("/movements", get(handlers::inventory::list_movements))
        .route("/alerts", get(handlers::inventory::stock_alerts))
        .route("/scale-file", get(handlers::inventory::scale_file));

    let pos_routes = Router::new()
        .route("/carts", post(handlers::pos::open_cart))
        .route(
            "/carts/{id}",
            get(handlers::pos::get_cart).delete(handlers::pos::discard_cart),
        )
        .route("/carts/{id}/items/unit", post(handlers::pos::add_unit_item))
        .route("/carts/{id}/items/weight", post(handlers::pos::add_weight_item))
        .route("/carts/{id}/items/{index}", delete(handlers::pos::remove_item))
        .route("/carts/{id}/checkout", post(handlers::pos::checkout))
        .route("/sales", get(handlers::pos::list_sales));

    let crm_routes = Router::new()
        .route(
            "/customers",
            post(handlers::crm::create_customer).get(handlers::crm::list_customers),
        )
        .route("/customers/{id}", get(handlers::crm::get_customer))
        .route("/customers/{id}/purchases", get(handlers::crm::purchase_history));

    let finance_routes = Router::new()
        .route(
            "/transactions",
            post(handlers::finance::create_transaction).get(handlers::finance::list_transactions),
        )
        .route("/summary", get(handlers::finance::summary));

    let purchasing_routes = Router::new()
        .route(
            "/suppliers",
            post(handlers::purchasing::create_supplier).get(handlers::purchasing::list_suppliers),
        )
        .route(
            "/orders",
            post(handlers::purchasing::create_order).get(handlers::purchasing::list_orders),
        )
        .route("/orders/{id}/receive", post(handlers::purchasing::receive_order))
        .route("/orders/{id}/cancel", post(handlers::purchasing::cancel_order));

    let reports_routes = Router::new()
        .route("/summary", get(handlers::reports::dashboard_summary))
        .route("/sales-by-channel", get(handlers::reports::sales_by_channel))
        .route("/churn-risk", get(handlers::reports::churn_risk));

    // Console SaaS: opera sobre os tenants, sem o cabeçalho X-Company-ID
    let admin_routes = Router::new()
        .route(
            "/companies",
            post(handlers::admin::create_company).get(handlers::admin::list_companies),
        )
        .route("/companies/{id}", get(handlers::admin::get_company))
        .route("/companies/{id}/status", axum::routing::patch(handlers::admin::update_company_status))
        .route("/companies/{id}/integrations", put(handlers::admin::set_enabled_integrations))
        .route("/companies/{id}/backup", get(handlers::admin::backup_company))
        .route("/plans", post(handlers::admin::create_plan).get(handlers::admin::list_plans))
        .route("/plans/{id}", put(handlers::admin::update_plan))
        .route("/users", post(handlers::admin::create_user).get(handlers::admin::list_users))
        .route("/integrations", get(handlers::admin::list_integrations));

    let settings_routes = Router::new().route(
        "/",
        get(handlers::settings::get_settings).put(handlers::settings::update_settings),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/insights", get(handlers::reports::insights))
        .route("/api/audit", get(handlers::audit::list_audit_logs))
        .nest("/api/inventory", inventory_routes)
        .nest("/api/pos", pos_routes)
        .nest("/api/crm", crm_routes)
        .nest("/api/finance", finance_routes)
        .nest("/api/purchasing", purchasing_routes)
        .nest("/api/reports", reports_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/settings", settings_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
