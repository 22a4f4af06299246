// src/services/purchasing_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::purchasing::{PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus, Supplier},
    services::InventoryService,
    store::PurchasingStore,
};

/// Compras: fornecedores e pedidos. Um pedido nasce pendente; recebê-lo é
/// o que efetivamente dá entrada no estoque (uma entrada do razão por
/// item). Pedidos recebidos ou cancelados não transitam mais.
#[derive(Clone)]
pub struct PurchasingService {
    store: PurchasingStore,
    inventory: InventoryService,
}

pub struct NewSupplier {
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: String,
    pub category: String,
}

pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: Decimal,
    // Ausente: usa o custo cadastrado no produto
    pub cost_price: Option<Decimal>,
}

impl PurchasingService {
    pub fn new(store: PurchasingStore, inventory: InventoryService) -> Self {
        Self { store, inventory }
    }

    // --- Fornecedores ---

    pub async fn create_supplier(
        &self,
        company_id: Uuid,
        new: NewSupplier,
    ) -> Result<Supplier, AppError> {
        if new.name.trim().is_empty() {
            return Err(AppError::InvalidInput("nome do fornecedor é obrigatório"));
        }

        Ok(self
            .store
            .insert_supplier(Supplier {
                id: Uuid::new_v4(),
                company_id,
                name: new.name,
                cnpj: new.cnpj,
                email: new.email,
                phone: new.phone,
                category: new.category,
            })
            .await)
    }

    pub async fn list_suppliers(&self, company_id: Uuid) -> Vec<Supplier> {
        self.store.list_suppliers(company_id).await
    }

    // --- Pedidos ---

    pub async fn create_order(
        &self,
        company_id: Uuid,
        supplier_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> Result<PurchaseOrder, AppError> {
        let supplier = self
            .store
            .get_supplier(company_id, supplier_id)
            .await
            .ok_or(AppError::SupplierNotFound)?;
        if items.is_empty() {
            return Err(AppError::InvalidInput("pedido sem itens"));
        }

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = self.inventory.get_product(company_id, item.product_id).await?;
            if item.quantity <= Decimal::ZERO || !product.unit.accepts(item.quantity) {
                return Err(AppError::InvalidInput("quantidade inválida no pedido"));
            }
            lines.push(PurchaseOrderItem {
                product_id: product.id,
                name: product.name,
                quantity: item.quantity,
                cost_price: item
                    .cost_price
                    .or(product.cost_price)
                    .unwrap_or(Decimal::ZERO),
            });
        }

        let total_amount = lines.iter().map(|l| l.quantity * l.cost_price).sum();
        Ok(self
            .store
            .insert_order(PurchaseOrder {
                id: Uuid::new_v4(),
                company_id,
                supplier_id: supplier.id,
                supplier_name: supplier.name,
                status: PurchaseOrderStatus::Pending,
                items: lines,
                total_amount,
                timestamp: Utc::now(),
            })
            .await)
    }

    pub async fn list_orders(&self, company_id: Uuid) -> Vec<PurchaseOrder> {
        self.store.list_orders(company_id).await
    }

    /// Recebimento: pendente -> recebido, e uma entrada do razão por item.
    /// Antes da transição, todos os produtos do pedido são conferidos: um
    /// produto removido entre a criação e o recebimento recusa o pedido
    /// inteiro, que permanece pendente e sem nenhuma entrada aplicada.
    pub async fn receive_order(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<PurchaseOrder, AppError> {
        let pending = self
            .store
            .get_order(company_id, order_id)
            .await
            .ok_or(AppError::PurchaseOrderNotFound)?;
        if pending.status != PurchaseOrderStatus::Pending {
            return Err(AppError::OrderNotPending);
        }
        for item in &pending.items {
            self.inventory.get_product(company_id, item.product_id).await?;
        }

        let order = self
            .store
            .with_order_mut(company_id, order_id, |order| {
                if order.status != PurchaseOrderStatus::Pending {
                    return Err(AppError::OrderNotPending);
                }
                order.status = PurchaseOrderStatus::Received;
                Ok(order.clone())
            })
            .await?;

        for item in &order.items {
            self.inventory
                .restock(company_id, user_id, item.product_id, item.quantity, None)
                .await?;
        }

        Ok(order)
    }

    pub async fn cancel_order(
        &self,
        company_id: Uuid,
        order_id: Uuid,
    ) -> Result<PurchaseOrder, AppError> {
        self.store
            .with_order_mut(company_id, order_id, |order| {
                if order.status != PurchaseOrderStatus::Pending {
                    return Err(AppError::OrderNotPending);
                }
                order.status = PurchaseOrderStatus::Cancelled;
                Ok(order.clone())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::ProductUnit;
    use crate::services::inventory_service::NewProduct;
    use crate::store::{InventoryStore, SalesStore};
    use std::collections::HashMap;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    async fn fixture() -> (PurchasingService, InventoryService, Uuid) {
        let inventory = InventoryService::new(InventoryStore::new(), SalesStore::new());
        let svc = PurchasingService::new(PurchasingStore::new(), inventory.clone());
        (svc, inventory, Uuid::new_v4())
    }

    async fn seed_supplier(svc: &PurchasingService, company: Uuid) -> Supplier {
        svc.create_supplier(
            company,
            NewSupplier {
                name: "Bio Distribuidora".into(),
                cnpj: "44.333.222/0001-11".into(),
                email: "vendas@biodist.example".into(),
                phone: "(11) 3333-2222".into(),
                category: "Castanhas".into(),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_product(inventory: &InventoryService, company: Uuid) -> Uuid {
        inventory
            .create_product(
                company,
                NewProduct {
                    name: "Amêndoa Laminada".into(),
                    category: "Oleaginosas".into(),
                    unit: ProductUnit::Kg,
                    price_per_unit: dec("95.00"),
                    channel_prices: HashMap::new(),
                    cost_price: Some(dec("60.00")),
                    initial_warehouse_stock: dec("4"),
                    initial_store_stock: dec("1"),
                    min_stock_warehouse: dec("5"),
                    min_stock_store: dec("1"),
                    sku: "AL-001".into(),
                    scale_code: "103".into(),
                    barcode: None,
                    image_url: None,
                    next_expiration_date: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn order_total_comes_from_cost_prices() {
        let (svc, inventory, company) = fixture().await;
        let supplier = seed_supplier(&svc, company).await;
        let product_id = seed_product(&inventory, company).await;

        let order = svc
            .create_order(
                company,
                supplier.id,
                vec![NewOrderItem { product_id, quantity: dec("10"), cost_price: None }],
            )
            .await
            .unwrap();

        assert_eq!(order.status, PurchaseOrderStatus::Pending);
        // Sem custo no item, usa o custo do cadastro: 10 x 60.00
        assert_eq!(order.total_amount, dec("600.00"));
    }

    #[tokio::test]
    async fn receiving_restocks_the_warehouse() {
        let (svc, inventory, company) = fixture().await;
        let supplier = seed_supplier(&svc, company).await;
        let product_id = seed_product(&inventory, company).await;
        let user = Uuid::new_v4();

        let order = svc
            .create_order(
                company,
                supplier.id,
                vec![NewOrderItem { product_id, quantity: dec("10"), cost_price: Some(dec("58")) }],
            )
            .await
            .unwrap();

        let received = svc.receive_order(company, user, order.id).await.unwrap();
        assert_eq!(received.status, PurchaseOrderStatus::Received);

        let product = inventory.get_product(company, product_id).await.unwrap();
        assert_eq!(product.current_stock, dec("14"));
        assert_eq!(product.exposed_stock, dec("1"));
        assert_eq!(inventory.list_movements(company).await.len(), 1);

        // Receber de novo é recusado
        let err = svc.receive_order(company, user, order.id).await.unwrap_err();
        assert!(matches!(err, AppError::OrderNotPending));
    }

    #[tokio::test]
    async fn cancelled_orders_stop_transitioning() {
        let (svc, inventory, company) = fixture().await;
        let supplier = seed_supplier(&svc, company).await;
        let product_id = seed_product(&inventory, company).await;

        let order = svc
            .create_order(
                company,
                supplier.id,
                vec![NewOrderItem { product_id, quantity: dec("2"), cost_price: None }],
            )
            .await
            .unwrap();

        svc.cancel_order(company, order.id).await.unwrap();
        let err = svc
            .receive_order(company, Uuid::new_v4(), order.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OrderNotPending));

        // Nada entrou no estoque
        let product = inventory.get_product(company, product_id).await.unwrap();
        assert_eq!(product.current_stock, dec("4"));
    }

    #[tokio::test]
    async fn receiving_with_a_deleted_product_leaves_the_order_pending() {
        let (svc, inventory, company) = fixture().await;
        let supplier = seed_supplier(&svc, company).await;
        let product_id = seed_product(&inventory, company).await;

        let order = svc
            .create_order(
                company,
                supplier.id,
                vec![NewOrderItem { product_id, quantity: dec("10"), cost_price: None }],
            )
            .await
            .unwrap();

        // Produto some entre a criação e o recebimento
        inventory.delete_product(company, product_id).await.unwrap();

        let err = svc
            .receive_order(company, Uuid::new_v4(), order.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound));

        // Pedido intacto: continua pendente e nada entrou no razão
        let orders = svc.list_orders(company).await;
        assert_eq!(orders[0].status, PurchaseOrderStatus::Pending);
        assert!(inventory.list_movements(company).await.is_empty());
    }

    #[tokio::test]
    async fn empty_orders_and_unknown_suppliers_are_rejected() {
        let (svc, inventory, company) = fixture().await;
        let supplier = seed_supplier(&svc, company).await;
        let product_id = seed_product(&inventory, company).await;

        let err = svc.create_order(company, supplier.id, vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = svc
            .create_order(
                company,
                Uuid::new_v4(),
                vec![NewOrderItem { product_id, quantity: dec("1"), cost_price: None }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SupplierNotFound));
    }
}
