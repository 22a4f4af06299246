// src/handlers/admin.rs
//
// Console SaaS (superadmin): opera SOBRE os tenants, então nenhuma rota
// daqui usa o cabeçalho X-Company-ID. A empresa alvo vai na URL.

use axum::{
    Json,
    extract::{Path, Query, State},
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
    middleware::i18n::Locale,
    models::admin::{CompanyStatus, Plan, UserRole},
    services::admin_service::{NewCompany, NewPlan, NewUser},
};

// ---
// Payload: CreateCompany
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1, message = "O subdomínio é obrigatório."))]
    pub subdomain: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub cnpj: String,
    #[validate(email(message = "E-mail inválido."))]
    pub main_email: String,
    pub plan_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/admin/companies",
    tag = "Admin SaaS",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada em trial", body = crate::models::admin::Company),
        (status = 404, description = "Plano não encontrado"),
        (status = 409, description = "Subdomínio já está em uso")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let company = app_state
        .admin_service
        .create_company(NewCompany {
            subdomain: payload.subdomain,
            name: payload.name,
            cnpj: payload.cnpj,
            main_email: payload.main_email,
            plan_id: payload.plan_id,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn list_companies(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.admin_service.list_companies().await)
}

pub async fn get_company(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let company = app_state
        .admin_service
        .get_company(company_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(company))
}

// ---
// Payload: UpdateCompanyStatus (suspensão/reativação do tenant)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyStatusPayload {
    pub status: CompanyStatus,
}

#[utoipa::path(
    patch,
    path = "/api/admin/companies/{id}/status",
    tag = "Admin SaaS",
    request_body = UpdateCompanyStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = crate::models::admin::Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da empresa")
    )
)]
pub async fn update_company_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let company = app_state
        .admin_service
        .update_company_status(company_id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(company))
}

// ---
// Payload: SetIntegrations (slugs habilitados para o tenant)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetIntegrationsPayload {
    pub slugs: Vec<String>,
}

pub async fn set_enabled_integrations(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<SetIntegrationsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let company = app_state
        .admin_service
        .set_enabled_integrations(company_id, payload.slugs)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(company))
}

#[utoipa::path(
    get,
    path = "/api/admin/companies/{id}/backup",
    tag = "Admin SaaS",
    responses(
        (status = 200, description = "Backup Completo: todas as coleções do tenant num único JSON"),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da empresa")
    )
)]
pub async fn backup_company(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let document = app_state
        .admin_service
        .backup(company_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(document))
}

// ---
// Payload: CreatePlan
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub price: Decimal,
    pub max_users: u32,
    pub max_products: u32,
    pub max_integrations: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/admin/plans",
    tag = "Admin SaaS",
    request_body = CreatePlanPayload,
    responses(
        (status = 201, description = "Plano criado", body = Plan)
    )
)]
pub async fn create_plan(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreatePlanPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let plan = app_state
        .admin_service
        .create_plan(NewPlan {
            name: payload.name,
            price: payload.price,
            max_users: payload.max_users,
            max_products: payload.max_products,
            max_integrations: payload.max_integrations,
            features: payload.features,
        })
        .await;

    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn list_plans(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.admin_service.list_plans().await)
}

pub async fn update_plan(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(plan_id): Path<Uuid>,
    Json(mut plan): Json<Plan>,
) -> Result<impl IntoResponse, ApiError> {
    // O ID da URL manda; o do corpo é ignorado
    plan.id = plan_id;
    let plan = app_state
        .admin_service
        .update_plan(plan)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(plan))
}

// ---
// Payload: CreateUser
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    // Ausente: usuário global do console
    pub company_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub role: UserRole,
    #[validate(email(message = "E-mail inválido."))]
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Admin SaaS",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = crate::models::admin::User),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .admin_service
        .create_user(NewUser {
            company_id: payload.company_id,
            name: payload.name,
            role: payload.role,
            email: payload.email,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub company_id: Option<Uuid>,
}

pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    Json(app_state.admin_service.list_users(query.company_id).await)
}

pub async fn list_integrations(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.admin_service.list_integrations().await)
}
