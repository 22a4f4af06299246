// src/store/purchasing_store.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::purchasing::{PurchaseOrder, Supplier};

#[derive(Clone, Default)]
pub struct PurchasingStore {
    suppliers: Arc<RwLock<HashMap<Uuid, Supplier>>>,
    orders: Arc<RwLock<HashMap<Uuid, PurchaseOrder>>>,
}

impl PurchasingStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Fornecedores ---

    pub async fn insert_supplier(&self, supplier: Supplier) -> Supplier {
        let mut suppliers = self.suppliers.write().await;
        suppliers.insert(supplier.id, supplier.clone());
        supplier
    }

    pub async fn get_supplier(&self, company_id: Uuid, supplier_id: Uuid) -> Option<Supplier> {
        let suppliers = self.suppliers.read().await;
        suppliers
            .get(&supplier_id)
            .filter(|s| s.company_id == company_id)
            .cloned()
    }

    pub async fn list_suppliers(&self, company_id: Uuid) -> Vec<Supplier> {
        let suppliers = self.suppliers.read().await;
        let mut list: Vec<Supplier> = suppliers
            .values()
            .filter(|s| s.company_id == company_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    // --- Pedidos de compra ---

    pub async fn insert_order(&self, order: PurchaseOrder) -> PurchaseOrder {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        order
    }

    pub async fn get_order(&self, company_id: Uuid, order_id: Uuid) -> Option<PurchaseOrder> {
        let orders = self.orders.read().await;
        orders
            .get(&order_id)
            .filter(|o| o.company_id == company_id)
            .cloned()
    }

    pub async fn list_orders(&self, company_id: Uuid) -> Vec<PurchaseOrder> {
        let orders = self.orders.read().await;
        let mut list: Vec<PurchaseOrder> = orders
            .values()
            .filter(|o| o.company_id == company_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list
    }

    pub async fn with_order_mut<T, F>(
        &self,
        company_id: Uuid,
        order_id: Uuid,
        f: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(&mut PurchaseOrder) -> Result<T, AppError>,
    {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&order_id)
            .filter(|o| o.company_id == company_id)
            .ok_or(AppError::PurchaseOrderNotFound)?;
        f(order)
    }
}
