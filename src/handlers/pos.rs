// src/handlers/pos.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::pos::{DocumentType, PaymentMethod},
    services::pos_service::FinalizeSale,
};

#[utoipa::path(
    post,
    path = "/api/pos/carts",
    tag = "PDV",
    responses(
        (status = 201, description = "Carrinho aberto", body = crate::models::pos::Cart)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn open_cart(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    let cart = app_state.pos_service.open_cart(tenant.0).await;
    (StatusCode::CREATED, Json(cart))
}

pub async fn get_cart(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(cart_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .pos_service
        .view_cart(tenant.0, cart_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(view))
}

pub async fn discard_cart(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(cart_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .pos_service
        .discard_cart(tenant.0, cart_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: AddUnitItem (bipe: cada chamada soma +1)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddUnitItemPayload {
    pub product_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/pos/carts/{id}/items/unit",
    tag = "PDV",
    request_body = AddUnitItemPayload,
    responses(
        (status = 200, description = "Linha acumulada", body = crate::models::pos::CartView),
        (status = 400, description = "Produto de peso não aceita bipe unitário")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do carrinho"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn add_unit_item(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<AddUnitItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .pos_service
        .add_unit_item(tenant.0, cart_id, payload.product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(view))
}

// ---
// Payload: AddWeightItem (pesagem da balança, sempre nova linha)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWeightItemPayload {
    pub product_id: Uuid,
    #[schema(example = "0.350")]
    pub weight: Decimal,
}

#[utoipa::path(
    post,
    path = "/api/pos/carts/{id}/items/weight",
    tag = "PDV",
    request_body = AddWeightItemPayload,
    responses(
        (status = 200, description = "Pesagem adicionada como nova linha", body = crate::models::pos::CartView),
        (status = 400, description = "Peso inválido ou produto unitário")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do carrinho"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn add_weight_item(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<AddWeightItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .pos_service
        .add_weight_item(tenant.0, cart_id, payload.product_id, payload.weight)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(view))
}

pub async fn remove_item(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path((cart_id, index)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .pos_service
        .remove_item(tenant.0, cart_id, index)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(view))
}

// ---
// Payload: Checkout
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub payment_method: PaymentMethod,
    pub document_type: DocumentType,
    pub customer_id: Option<Uuid>,
    // CPF na Nota, quando o cliente pedir
    pub nf_cpf: Option<String>,
    pub seller_id: Uuid,
    #[validate(length(min = 1, message = "O nome do vendedor é obrigatório."))]
    pub seller_name: String,
    pub origin: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/pos/carts/{id}/checkout",
    tag = "PDV",
    request_body = CheckoutPayload,
    responses(
        (status = 201, description = "Venda finalizada", body = crate::models::pos::Sale),
        (status = 400, description = "Carrinho vazio ou payload inválido"),
        (status = 404, description = "Carrinho ou cliente não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do carrinho"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let sale = app_state
        .pos_service
        .finalize_sale(
            tenant.0,
            FinalizeSale {
                cart_id,
                payment_method: payload.payment_method,
                document_type: payload.document_type,
                customer_id: payload.customer_id,
                nf_cpf: payload.nf_cpf,
                seller_id: payload.seller_id,
                seller_name: payload.seller_name,
                origin: payload.origin,
            },
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(sale)))
}

#[utoipa::path(
    get,
    path = "/api/pos/sales",
    tag = "PDV",
    responses(
        (status = 200, description = "Vendas da loja, mais recentes primeiro", body = Vec<crate::models::pos::Sale>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> impl IntoResponse {
    Json(app_state.pos_service.list_sales(tenant.0).await)
}
