// src/handlers/purchasing.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    services::purchasing_service::{NewOrderItem, NewSupplier},
};

// ---
// Payload: CreateSupplier
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub category: String,
}

#[utoipa::path(
    post,
    path = "/api/purchasing/suppliers",
    tag = "Compras",
    request_body = CreateSupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = crate::models::purchasing::Supplier)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let supplier = app_state
        .purchasing_service
        .create_supplier(
            tenant.0,
            NewSupplier {
                name: payload.name,
                cnpj: payload.cnpj,
                email: payload.email,
                phone: payload.phone,
                category: payload.category,
            },
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    get,
    path = "/api/purchasing/suppliers",
    tag = "Compras",
    responses(
        (status = 200, description = "Fornecedores da loja", body = Vec<crate::models::purchasing::Supplier>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.purchasing_service.list_suppliers(tenant.0).await)
}

// ---
// Payload: CreateOrder
// ---
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: Uuid,
    pub quantity: Decimal,
    // Ausente: usa o custo cadastrado no produto
    pub cost_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub supplier_id: Uuid,
    #[validate(length(min = 1, message = "O pedido precisa de ao menos um item."))]
    pub items: Vec<OrderItemPayload>,
}

#[utoipa::path(
    post,
    path = "/api/purchasing/orders",
    tag = "Compras",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado pendente", body = crate::models::purchasing::PurchaseOrder),
        (status = 404, description = "Fornecedor ou produto não encontrado")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let items = payload
        .items
        .into_iter()
        .map(|i| NewOrderItem {
            product_id: i.product_id,
            quantity: i.quantity,
            cost_price: i.cost_price,
        })
        .collect();

    let order = app_state
        .purchasing_service
        .create_order(tenant.0, payload.supplier_id, items)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/purchasing/orders",
    tag = "Compras",
    responses(
        (status = 200, description = "Pedidos, mais recentes primeiro", body = Vec<crate::models::purchasing::PurchaseOrder>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.purchasing_service.list_orders(tenant.0).await)
}

// ---
// Payload: ReceiveOrder (quem recebeu assina as entradas de estoque)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveOrderPayload {
    pub user_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/purchasing/orders/{id}/receive",
    tag = "Compras",
    request_body = ReceiveOrderPayload,
    responses(
        (status = 200, description = "Pedido recebido e estoque atualizado", body = crate::models::purchasing::PurchaseOrder),
        (status = 409, description = "Pedido não está pendente")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn receive_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<ReceiveOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .purchasing_service
        .receive_order(tenant.0, payload.user_id, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(order))
}

#[utoipa::path(
    post,
    path = "/api/purchasing/orders/{id}/cancel",
    tag = "Compras",
    responses(
        (status = 200, description = "Pedido cancelado", body = crate::models::purchasing::PurchaseOrder),
        (status = 409, description = "Pedido não está pendente")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn cancel_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .purchasing_service
        .cancel_order(tenant.0, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(order))
}
