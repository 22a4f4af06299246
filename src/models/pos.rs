// src/models/pos.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::ProductUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Cupom, // Cupom simples
    Nfe,   // Nota Fiscal eletrônica
}

// Linha do carrinho / item da venda. O total da linha é sempre
// quantity * price, recalculado a cada mutação do carrinho.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
    pub unit: ProductUnit,
}

// Venda finalizada: imutável após criada. Consumida exatamente uma vez
// pelo razão de estoque para baixar a gôndola.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<SaleItem>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub document_type: DocumentType,
    pub customer_id: Option<Uuid>,
    // CPF na Nota (NF Paulista)
    pub nf_cpf: Option<String>,
    pub seller_id: Uuid,
    // Canal de origem (Balcão, iFood, ...)
    #[schema(example = "Balcão")]
    pub origin: String,
}

// Carrinho em montagem (estado por sessão de caixa).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    pub items: Vec<SaleItem>,
}

impl Cart {
    pub fn new(id: Uuid, company_id: Uuid) -> Self {
        Self { id, company_id, items: Vec::new() }
    }

    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(|i| i.total).sum()
    }
}

// Visão do carrinho devolvida ao caixa: linhas + total + prévia de pontos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: Uuid,
    pub items: Vec<SaleItem>,
    pub total_amount: Decimal,
    pub points_to_earn: i64,
}
