// src/handlers/reports.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use uuid::Uuid;

use crate::{config::AppState, middleware::tenancy::TenantContext};

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Cards do painel: vendas, alertas, saldo e catálogo", body = crate::models::reports::DashboardSummary)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn dashboard_summary(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.reporting_service.dashboard_summary(tenant.0).await)
}

#[utoipa::path(
    get,
    path = "/api/reports/sales-by-channel",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Faturamento por canal de origem", body = Vec<crate::models::reports::ChannelSalesEntry>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn sales_by_channel(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.reporting_service.sales_by_channel(tenant.0).await)
}

#[utoipa::path(
    get,
    path = "/api/reports/churn-risk",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Clientes sem compra há mais de 21 dias", body = Vec<crate::models::reports::ChurnRiskEntry>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn churn_risk(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.reporting_service.churn_risk(tenant.0).await)
}

#[utoipa::path(
    get,
    path = "/api/insights",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Texto consultivo sobre o estoque; nunca falha")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn insights(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    let text = app_state.insight_service.generate(tenant.0).await;
    Json(json!({ "insights": text }))
}
