// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::MessageCatalog;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
// Nenhuma variante é fatal: todas viram uma resposta HTTP no ponto da ação.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Saque maior que o saldo do local de origem (entrada/transferência/perda).
    // O consumo de venda NÃO passa por aqui: oversell é permitido lá.
    #[error("Estoque insuficiente")]
    InsufficientStock,

    // Quantidade não positiva, fração em produto unitário, campo faltando...
    #[error("Entrada inválida: {0}")]
    InvalidInput(&'static str),

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Plano não encontrado")]
    PlanNotFound,

    #[error("Fornecedor não encontrado")]
    SupplierNotFound,

    #[error("Pedido de compra não encontrado")]
    PurchaseOrderNotFound,

    #[error("Carrinho não encontrado")]
    CartNotFound,

    // Produto referenciado por vendas/movimentações não pode ser removido.
    #[error("Produto em uso")]
    ProductInUse,

    #[error("Subdomínio já está em uso")]
    SubdomainTaken,

    // Transição inválida: só pedidos pendentes são recebidos/cancelados.
    #[error("Pedido não está pendente")]
    OrderNotPending,

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Código estável usado como chave do catálogo de mensagens.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::InsufficientStock => "insufficient_stock",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::ProductNotFound => "product_not_found",
            AppError::CustomerNotFound => "customer_not_found",
            AppError::CompanyNotFound => "company_not_found",
            AppError::PlanNotFound => "plan_not_found",
            AppError::SupplierNotFound => "supplier_not_found",
            AppError::PurchaseOrderNotFound => "purchase_order_not_found",
            AppError::CartNotFound => "cart_not_found",
            AppError::ProductInUse => "product_in_use",
            AppError::SubdomainTaken => "subdomain_taken",
            AppError::OrderNotPending => "order_not_pending",
            AppError::InternalServerError(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientStock
            | AppError::ProductInUse
            | AppError::SubdomainTaken
            | AppError::OrderNotPending => StatusCode::CONFLICT,
            AppError::ProductNotFound
            | AppError::CustomerNotFound
            | AppError::CompanyNotFound
            | AppError::PlanNotFound
            | AppError::SupplierNotFound
            | AppError::PurchaseOrderNotFound
            | AppError::CartNotFound => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Resolve a mensagem no idioma do usuário e fecha a resposta HTTP.
    pub fn to_api_error(self, locale: &Locale, catalog: &MessageCatalog) -> ApiError {
        // Validação retorna todos os detalhes de campo, como nas outras rotas
        // o front espera { error, details }.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            return ApiError {
                status: StatusCode::BAD_REQUEST,
                message: catalog.resolve(&locale.0, "validation").to_string(),
                details: Some(details),
            };
        }

        if let AppError::InternalServerError(ref e) = self {
            // O tracing guarda o detalhe; o cliente recebe a mensagem genérica.
            tracing::error!("Erro interno do servidor: {:?}", e);
        }

        ApiError {
            status: self.status(),
            message: catalog.resolve(&locale.0, self.code()).to_string(),
            details: None,
        }
    }
}

// Erro já pronto para virar resposta: status + mensagem traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<std::collections::HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.message, "details": details })),
            None => Json(json!({ "error": self.message })),
        };
        (self.status, body).into_response()
    }
}

// Fallback para extratores e camadas que não possuem Locale: responde em
// inglês com o código cru da variante.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::InternalServerError(ref e) = self {
            tracing::error!("Erro interno do servidor: {:?}", e);
        }
        let body = Json(json!({ "error": self.code() }));
        (status, body).into_response()
    }
}
