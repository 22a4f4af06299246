// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    services::crm_service::NewCustomer,
};

// ---
// Payload: CreateCustomer
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub cpf: String,
    #[validate(email(message = "E-mail inválido."))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[utoipa::path(
    post,
    path = "/api/crm/customers",
    tag = "CRM",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente criado com saldo zero de pontos", body = crate::models::crm::Customer),
        (status = 400, description = "Payload inválido")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let customer = app_state
        .crm_service
        .create_customer(
            tenant.0,
            NewCustomer {
                name: payload.name,
                cpf: payload.cpf,
                email: payload.email,
                phone: payload.phone,
            },
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/api/crm/customers",
    tag = "CRM",
    responses(
        (status = 200, description = "Clientes da loja", body = Vec<crate::models::crm::Customer>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.crm_service.list_customers(tenant.0).await)
}

pub async fn get_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = app_state
        .crm_service
        .get_customer(tenant.0, customer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(customer))
}

#[utoipa::path(
    get,
    path = "/api/crm/customers/{id}/purchases",
    tag = "CRM",
    responses(
        (status = 200, description = "Histórico de compras, mais recentes primeiro", body = Vec<crate::models::pos::Sale>),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn purchase_history(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = app_state
        .crm_service
        .purchase_history(tenant.0, customer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(sales))
}
