// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Importa os nossos extratores e erros
use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::inventory::{LossSource, ProductUnit, TransferDirection},
    services::inventory_service::{NewProduct, ProductEdit},
};

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    pub unit: ProductUnit,

    #[validate(custom(function = "validate_not_negative"))]
    pub price_per_unit: Decimal,

    #[serde(default)]
    pub channel_prices: HashMap<String, Decimal>,

    pub cost_price: Option<Decimal>,

    // Saldos iniciais dos dois locais. Zero é válido.
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub initial_warehouse_stock: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub initial_store_stock: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_stock_warehouse: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_stock_store: Decimal,

    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[serde(default)]
    pub scale_code: String,

    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub next_expiration_date: Option<NaiveDate>,
}

#[utoipa::path(
    post,
    path = "/api/inventory/products",
    tag = "Inventário",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = crate::models::inventory::Product),
        (status = 400, description = "Payload inválido")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .inventory_service
        .create_product(
            tenant.0,
            NewProduct {
                name: payload.name,
                category: payload.category,
                unit: payload.unit,
                price_per_unit: payload.price_per_unit,
                channel_prices: payload.channel_prices,
                cost_price: payload.cost_price,
                initial_warehouse_stock: payload.initial_warehouse_stock,
                initial_store_stock: payload.initial_store_stock,
                min_stock_warehouse: payload.min_stock_warehouse,
                min_stock_store: payload.min_stock_store,
                sku: payload.sku,
                scale_code: payload.scale_code,
                barcode: payload.barcode,
                image_url: payload.image_url,
                next_expiration_date: payload.next_expiration_date,
            },
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/products",
    tag = "Inventário",
    responses(
        (status = 200, description = "Catálogo da loja, ordenado por nome", body = Vec<crate::models::inventory::Product>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.inventory_service.list_products(tenant.0).await)
}

pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .inventory_service
        .get_product(tenant.0, product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

// ---
// Payload: UpdateProduct (só campos descritivos, saldos nunca entram aqui)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_per_unit: Option<Decimal>,
    pub channel_prices: Option<HashMap<String, Decimal>>,
    pub cost_price: Option<Decimal>,
    pub min_stock_warehouse: Option<Decimal>,
    pub min_stock_store: Option<Decimal>,
    pub next_expiration_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .inventory_service
        .update_product(
            tenant.0,
            product_id,
            ProductEdit {
                name: payload.name,
                category: payload.category,
                price_per_unit: payload.price_per_unit,
                channel_prices: payload.channel_prices,
                cost_price: payload.cost_price,
                min_stock_warehouse: payload.min_stock_warehouse,
                min_stock_store: payload.min_stock_store,
                next_expiration_date: payload.next_expiration_date,
                image_url: payload.image_url,
            },
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/products/{id}",
    tag = "Inventário",
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Produto possui vendas ou movimentações")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do produto"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .inventory_service
        .delete_product(tenant.0, product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: Restock (entrada de mercadoria, sempre no depósito)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestockPayload {
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    pub new_expiration_date: Option<NaiveDate>,
    pub user_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/inventory/products/{id}/restock",
    tag = "Inventário",
    request_body = RestockPayload,
    responses(
        (status = 200, description = "Entrada registrada no depósito", body = crate::models::inventory::Product),
        (status = 400, description = "Quantidade inválida"),
        (status = 404, description = "Produto não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do produto"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn restock(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<RestockPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .inventory_service
        .restock(
            tenant.0,
            payload.user_id,
            product_id,
            payload.amount,
            payload.new_expiration_date,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

// ---
// Payload: Transfer (depósito <-> gôndola)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    pub direction: TransferDirection,
    pub user_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/inventory/products/{id}/transfer",
    tag = "Inventário",
    request_body = TransferPayload,
    responses(
        (status = 200, description = "Transferência aplicada", body = crate::models::inventory::Product),
        (status = 409, description = "Estoque insuficiente no local de origem")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do produto"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn transfer(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<TransferPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .inventory_service
        .transfer(
            tenant.0,
            payload.user_id,
            product_id,
            payload.amount,
            payload.direction,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

// ---
// Payload: Loss (baixa por perda/vencimento)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LossPayload {
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    pub source: LossSource,
    // Ausente: assume "Vencimento"
    pub reason: Option<String>,
    pub user_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/inventory/products/{id}/loss",
    tag = "Inventário",
    request_body = LossPayload,
    responses(
        (status = 200, description = "Baixa registrada", body = crate::models::inventory::Product),
        (status = 409, description = "Estoque insuficiente no local de origem")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do produto"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn loss(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<LossPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .inventory_service
        .loss(
            tenant.0,
            payload.user_id,
            product_id,
            payload.amount,
            payload.source,
            payload.reason,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/api/inventory/movements",
    tag = "Inventário",
    responses(
        (status = 200, description = "Histórico de movimentações", body = Vec<crate::models::inventory::StockMovement>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.inventory_service.list_movements(tenant.0).await)
}

#[utoipa::path(
    get,
    path = "/api/inventory/alerts",
    tag = "Inventário",
    responses(
        (status = 200, description = "Alertas de compra, reposição e validade", body = Vec<crate::models::inventory::StockAlert>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn stock_alerts(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.inventory_service.stock_alerts(tenant.0).await)
}

#[utoipa::path(
    get,
    path = "/api/inventory/scale-file",
    tag = "Inventário",
    responses(
        (status = 200, description = "ITENS_BALANCA.txt: uma linha de largura fixa por produto, no formato dos softwares de balança (Toledo, Filizola, Elgin)", body = String, content_type = "text/plain")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn scale_file(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    let content = app_state.inventory_service.scale_file(tenant.0).await;
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ITENS_BALANCA.txt\"",
            ),
        ],
        content,
    )
}
