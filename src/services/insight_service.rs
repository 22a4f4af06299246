// src/services/insight_service.rs

use serde_json::json;
use uuid::Uuid;

use crate::{models::inventory::Product, services::InventoryService};

pub const INSIGHT_FALLBACK: &str = "Não foi possível carregar os insights no momento.";

/// Insights consultivos do painel, gerados a partir do subconjunto de
/// produtos com estoque baixo. Nunca devolve erro: sem credencial ou sem
/// produto em alerta, cai no texto fixo de indisponibilidade.
#[derive(Clone)]
pub struct InsightService {
    inventory: InventoryService,
    api_key: Option<String>,
}

impl InsightService {
    pub fn new(inventory: InventoryService, api_key: Option<String>) -> Self {
        Self { inventory, api_key }
    }

    pub async fn generate(&self, company_id: Uuid) -> String {
        let Some(_key) = self.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return INSIGHT_FALLBACK.to_string();
        };

        let low_stock = self.inventory.low_stock_products(company_id).await;
        if low_stock.is_empty() {
            return INSIGHT_FALLBACK.to_string();
        }

        // Prompt que seria enviado ao provedor, registrado em log
        let prompt = json!({
            "products": low_stock.iter().map(|p| json!({
                "name": p.name,
                "currentStock": p.current_stock,
                "exposedStock": p.exposed_stock,
            })).collect::<Vec<_>>(),
        });
        tracing::info!(target: "insights", %prompt, "geração de insights solicitada");

        compose(&low_stock)
    }
}

fn compose(low_stock: &[Product]) -> String {
    let mut lines = vec![format!(
        "{} produto(s) precisam de atenção de estoque:",
        low_stock.len()
    )];
    for p in low_stock {
        if p.needs_warehouse_reorder() {
            lines.push(format!(
                "- {}: depósito em {} (mínimo {}). Considere um pedido de compra.",
                p.name, p.current_stock, p.min_stock_warehouse
            ));
        }
        if p.needs_shelf_replenishment() {
            lines.push(format!(
                "- {}: gôndola em {} (mínimo {}). Reponha a partir do depósito.",
                p.name, p.exposed_stock, p.min_stock_store
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::ProductUnit;
    use crate::services::inventory_service::NewProduct;
    use crate::store::{InventoryStore, SalesStore};
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    async fn seed_low_stock(inventory: &InventoryService, company: Uuid) {
        inventory
            .create_product(
                company,
                NewProduct {
                    name: "Quinoa em Flocos".into(),
                    category: "Cereais".into(),
                    unit: ProductUnit::Kg,
                    price_per_unit: dec("40.00"),
                    channel_prices: HashMap::new(),
                    cost_price: None,
                    initial_warehouse_stock: dec("2"),
                    initial_store_stock: dec("0.5"),
                    min_stock_warehouse: dec("5"),
                    min_stock_store: dec("1"),
                    sku: "QF-001".into(),
                    scale_code: "104".into(),
                    barcode: None,
                    image_url: None,
                    next_expiration_date: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_credential_yields_fallback() {
        let inventory = InventoryService::new(InventoryStore::new(), SalesStore::new());
        let company = Uuid::new_v4();
        seed_low_stock(&inventory, company).await;

        let svc = InsightService::new(inventory, None);
        assert_eq!(svc.generate(company).await, INSIGHT_FALLBACK);
    }

    #[tokio::test]
    async fn no_low_stock_yields_fallback() {
        let inventory = InventoryService::new(InventoryStore::new(), SalesStore::new());
        let svc = InsightService::new(inventory, Some("key".into()));
        assert_eq!(svc.generate(Uuid::new_v4()).await, INSIGHT_FALLBACK);
    }

    #[tokio::test]
    async fn low_stock_products_show_up_in_the_text() {
        let inventory = InventoryService::new(InventoryStore::new(), SalesStore::new());
        let company = Uuid::new_v4();
        seed_low_stock(&inventory, company).await;

        let svc = InsightService::new(inventory, Some("key".into()));
        let text = svc.generate(company).await;
        assert!(text.contains("Quinoa em Flocos"));
        assert!(text.contains("pedido de compra"));
    }
}
