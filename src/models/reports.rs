// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// 1. Cards do topo do painel
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_sales: Decimal,   // Soma das vendas do período
    pub low_stock_alerts: u32,  // Produtos abaixo de qualquer limiar
    pub balance: Decimal,       // Entradas - Saídas
    pub product_count: u32,
}

// 2. Vendas por canal de origem
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSalesEntry {
    #[schema(example = "Balcão")]
    pub channel: String,
    pub total: Decimal,
}

// 3. Risco de churn (21+ dias sem comprar)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChurnRiskEntry {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    // None = nunca comprou
    pub days_inactive: Option<i64>,
}
