// src/handlers/audit.rs

use axum::{Json, extract::State, response::IntoResponse};
use uuid::Uuid;

use crate::{config::AppState, middleware::tenancy::TenantContext};

#[utoipa::path(
    get,
    path = "/api/audit",
    tag = "Auditoria",
    responses(
        (status = 200, description = "Trilha de auditoria, mais recente primeiro", body = Vec<crate::models::audit::AuditLog>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.admin_service.list_audit_logs(tenant.0).await)
}
