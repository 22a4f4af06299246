// src/models/purchasing.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Bio Distribuidora")]
    pub name: String,
    #[schema(example = "44.333.222/0001-11")]
    pub cnpj: String,
    pub email: String,
    pub phone: String,
    #[schema(example = "Castanhas")]
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Pending,
    Received,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: Decimal,
    pub cost_price: Decimal,
}

// Pedido de compra: criado pendente; recebê-lo gera entradas no razão de
// estoque, um item por linha. Pedidos não pendentes não transitam mais.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub status: PurchaseOrderStatus,
    pub items: Vec<PurchaseOrderItem>,
    pub total_amount: Decimal,
    pub timestamp: DateTime<Utc>,
}
