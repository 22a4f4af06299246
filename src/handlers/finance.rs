// src/handlers/finance.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::finance::TransactionKind,
    services::finance_service::NewTransaction,
};

// ---
// Payload: CreateTransaction
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,
    #[serde(default)]
    pub description: String,
    // Magnitude positiva; o sinal vem do tipo
    pub amount: Decimal,
}

#[utoipa::path(
    post,
    path = "/api/finance/transactions",
    tag = "Financeiro",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Lançamento registrado", body = crate::models::finance::FinancialTransaction),
        (status = 400, description = "Valor não positivo")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let transaction = app_state
        .finance_service
        .record_transaction(
            tenant.0,
            NewTransaction {
                kind: payload.kind,
                category: payload.category,
                description: payload.description,
                amount: payload.amount,
            },
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/api/finance/transactions",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Lançamentos, mais recentes primeiro", body = Vec<crate::models::finance::FinancialTransaction>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.finance_service.list_transactions(tenant.0).await)
}

#[utoipa::path(
    get,
    path = "/api/finance/summary",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Entradas, saídas e saldo", body = crate::models::finance::FinanceSummary)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn summary(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.finance_service.summary(tenant.0).await)
}
