// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use uuid::Uuid;

use crate::common::error::ApiError;

// O nome do nosso cabeçalho HTTP customizado
const COMPANY_ID_HEADER: &str = "x-company-id";

// O extrator de tenant: guarda o UUID da empresa que a requisição acessa.
// Toda rota de loja exige este cabeçalho.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    // ApiError já implementa IntoResponse
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts.headers.get(COMPANY_ID_HEADER);

        match header_value {
            Some(value) => {
                let value_str = value.to_str().map_err(|_| ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: "Cabeçalho X-Company-ID contém caracteres inválidos.".to_string(),
                    details: None,
                })?;

                let company_id = Uuid::parse_str(value_str).map_err(|_| ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: "Cabeçalho X-Company-ID inválido (não é um UUID).".to_string(),
                    details: None,
                })?;

                Ok(TenantContext(company_id))
            }
            None => Err(ApiError {
                status: StatusCode::BAD_REQUEST,
                message: "O cabeçalho X-Company-ID é obrigatório.".to_string(),
                details: None,
            }),
        }
    }
}
