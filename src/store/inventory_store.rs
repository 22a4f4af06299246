// src/store/inventory_store.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::inventory::{Product, StockMovement};

// Repositório em memória do catálogo e do histórico de movimentações.
// Todo o estado vive no processo: não existe persistência, um restart
// recomeça do seed.
//
// O lock de escrita do catálogo é a exclusão mútua por produto exigida
// pelas invariantes de saldo: cada operação do razão valida E muta dentro
// de um único escopo de escrita, então duas operações concorrentes sobre o
// mesmo produto sempre se serializam.
#[derive(Clone, Default)]
pub struct InventoryStore {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    movements: Arc<RwLock<Vec<StockMovement>>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Catálogo ---

    pub async fn insert_product(&self, product: Product) -> Product {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        product
    }

    pub async fn get_product(&self, company_id: Uuid, product_id: Uuid) -> Option<Product> {
        let products = self.products.read().await;
        products
            .get(&product_id)
            .filter(|p| p.company_id == company_id)
            .cloned()
    }

    pub async fn list_products(&self, company_id: Uuid) -> Vec<Product> {
        let products = self.products.read().await;
        let mut list: Vec<Product> = products
            .values()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Muta UM produto dentro de um único escopo de escrita. A closure
    /// valida e aplica a regra; em caso de Err nada é alterado (a closure
    /// recebe o produto já clonado e só gravamos no sucesso).
    pub async fn with_product_mut<T, F>(
        &self,
        company_id: Uuid,
        product_id: Uuid,
        f: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(&mut Product) -> Result<T, AppError>,
    {
        let mut products = self.products.write().await;
        let entry = products
            .get_mut(&product_id)
            .filter(|p| p.company_id == company_id)
            .ok_or(AppError::ProductNotFound)?;

        let mut candidate = entry.clone();
        let out = f(&mut candidate)?;
        candidate.updated_at = Utc::now();
        *entry = candidate;
        Ok(out)
    }

    /// Acesso de escrita ao catálogo inteiro, para operações que tocam
    /// várias linhas de uma vez (consumo de venda). Um único escopo de
    /// lock: ou todas as linhas aplicam, ou nenhuma é observável parcial.
    pub async fn with_catalog_mut<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut HashMap<Uuid, Product>) -> T,
    {
        let mut products = self.products.write().await;
        f(&mut products)
    }

    pub async fn remove_product(&self, company_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        let mut products = self.products.write().await;
        match products.get(&product_id) {
            Some(p) if p.company_id == company_id => {
                products.remove(&product_id);
                Ok(())
            }
            _ => Err(AppError::ProductNotFound),
        }
    }

    // --- Histórico (append-only) ---

    pub async fn record_movement(&self, movement: StockMovement) {
        let mut movements = self.movements.write().await;
        movements.push(movement);
    }

    pub async fn list_movements(&self, company_id: Uuid) -> Vec<StockMovement> {
        let movements = self.movements.read().await;
        movements
            .iter()
            .filter(|m| m.company_id == company_id)
            .cloned()
            .collect()
    }

    pub async fn product_has_movements(&self, product_id: Uuid) -> bool {
        let movements = self.movements.read().await;
        movements.iter().any(|m| m.product_id == product_id)
    }
}
