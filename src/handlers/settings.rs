// src/handlers/settings.rs

use axum::{Json, extract::State, response::IntoResponse};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::admin::StoreSettings,
};

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Configurações",
    responses(
        (status = 200, description = "Configurações da loja", body = StoreSettings),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .admin_service
        .get_settings(tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(settings))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Configurações",
    request_body = StoreSettings,
    responses(
        (status = 200, description = "Configurações substituídas", body = crate::models::admin::Company),
        (status = 400, description = "Fidelidade ativa exige limiar positivo")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(settings): Json<StoreSettings>,
) -> Result<impl IntoResponse, ApiError> {
    let company = app_state
        .admin_service
        .update_settings(tenant.0, settings)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(company))
}
