// src/store/sales_store.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::pos::{Cart, Sale};

// Vendas finalizadas: append-only, nunca editadas nem canceladas.
#[derive(Clone, Default)]
pub struct SalesStore {
    sales: Arc<RwLock<Vec<Sale>>>,
}

impl SalesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, sale: Sale) -> Sale {
        let mut sales = self.sales.write().await;
        sales.push(sale.clone());
        sale
    }

    pub async fn list(&self, company_id: Uuid) -> Vec<Sale> {
        let sales = self.sales.read().await;
        sales
            .iter()
            .filter(|s| s.company_id == company_id)
            .cloned()
            .collect()
    }

    pub async fn product_has_sales(&self, product_id: Uuid) -> bool {
        let sales = self.sales.read().await;
        sales
            .iter()
            .any(|s| s.items.iter().any(|i| i.product_id == product_id))
    }
}

// Carrinhos em montagem, um por sessão de caixa. Descartados na
// finalização da venda.
#[derive(Clone, Default)]
pub struct CartStore {
    carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, company_id: Uuid) -> Cart {
        let cart = Cart::new(Uuid::new_v4(), company_id);
        let mut carts = self.carts.write().await;
        carts.insert(cart.id, cart.clone());
        cart
    }

    pub async fn get(&self, company_id: Uuid, cart_id: Uuid) -> Result<Cart, AppError> {
        let carts = self.carts.read().await;
        carts
            .get(&cart_id)
            .filter(|c| c.company_id == company_id)
            .cloned()
            .ok_or(AppError::CartNotFound)
    }

    pub async fn with_cart_mut<T, F>(
        &self,
        company_id: Uuid,
        cart_id: Uuid,
        f: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(&mut Cart) -> Result<T, AppError>,
    {
        let mut carts = self.carts.write().await;
        let cart = carts
            .get_mut(&cart_id)
            .filter(|c| c.company_id == company_id)
            .ok_or(AppError::CartNotFound)?;
        f(cart)
    }

    pub async fn remove(&self, cart_id: Uuid) {
        let mut carts = self.carts.write().await;
        carts.remove(&cart_id);
    }
}
