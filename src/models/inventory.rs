// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Unidade de Venda ---
// Fixa na criação do produto: define se as quantidades são fracionadas
// (peso) ou inteiras (contagem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductUnit {
    Kg, // Granel (peso)
    Un, // Item (contagem)
}

impl ProductUnit {
    /// Produtos vendidos por unidade só aceitam quantidades inteiras.
    pub fn accepts(&self, quantity: Decimal) -> bool {
        match self {
            ProductUnit::Kg => true,
            ProductUnit::Un => quantity.is_integer(),
        }
    }
}

// --- 2. Produto (Catálogo + Saldos) ---
// O produto carrega os DOIS saldos físicos: depósito (current_stock) e
// gôndola (exposed_stock). Nenhuma operação do razão pode deixar qualquer
// um negativo; a única exceção é o consumo de venda (ver InventoryService).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,

    #[schema(example = "Castanha do Pará Inteira")]
    pub name: String,
    #[schema(example = "Oleaginosas")]
    pub category: String,
    pub unit: ProductUnit,

    // Preço base (loja física) e sobrescritas por canal (ex: {"ifood": 45.00})
    #[schema(example = "85.00")]
    pub price_per_unit: Decimal,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub channel_prices: HashMap<String, Decimal>,
    pub cost_price: Option<Decimal>,

    // Saldos por local
    pub current_stock: Decimal, // Depósito
    pub exposed_stock: Decimal, // Gôndola / Exposição

    // Limiares de alerta (consultivos, nunca bloqueiam operação)
    pub min_stock_warehouse: Decimal, // Alerta de Compra
    pub min_stock_store: Decimal,     // Alerta de Reposição de Gôndola

    #[schema(example = "CP-001")]
    pub sku: String,
    #[schema(example = "101")]
    pub scale_code: String, // PLU da balança
    pub barcode: Option<String>,
    pub image_url: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub next_expiration_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Preço efetivo para um canal: sobrescrita se existir, senão o base.
    pub fn price_for_channel(&self, channel_slug: &str) -> Decimal {
        self.channel_prices
            .get(channel_slug)
            .copied()
            .unwrap_or(self.price_per_unit)
    }

    pub fn total_stock(&self) -> Decimal {
        self.current_stock + self.exposed_stock
    }

    pub fn needs_warehouse_reorder(&self) -> bool {
        self.current_stock <= self.min_stock_warehouse
    }

    pub fn needs_shelf_replenishment(&self) -> bool {
        self.exposed_stock <= self.min_stock_store
    }
}

// --- 3. Movimentações de Estoque (Histórico) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Entry,    // Entrada de fornecedor
    Loss,     // Baixa por perda/vencimento
    Transfer, // Depósito <-> Gôndola
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockLocation {
    Warehouse,
    Storefront,
    Supplier,
}

// Registro de auditoria de CADA operação do razão de estoque.
// Append-only: nunca é alterado nem removido.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub from: StockLocation,
    pub to: Option<StockLocation>,
    // Sempre a magnitude positiva da operação
    pub quantity: Decimal,
    #[schema(example = "Vencimento")]
    pub reason: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
}

// --- 4. Parâmetros das operações do razão ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    ToStore,     // Depósito -> Gôndola
    ToWarehouse, // Gôndola -> Depósito
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LossSource {
    Store,
    Warehouse,
}

// --- 5. Status derivado de validade ---
// Função pura de next_expiration_date vs hoje; nunca bloqueia nada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationStatus {
    Expired,
    Warning, // Vence em até 15 dias
    Ok,
}

// --- 6. Alertas derivados (somente leitura) ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub product_id: Uuid,
    pub product_name: String,
    pub reorder_from_supplier: bool, // current_stock <= min_stock_warehouse
    pub replenish_shelf: bool,       // exposed_stock <= min_stock_store
    pub expiration: ExpirationStatus,
}
