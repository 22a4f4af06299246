// src/store/crm_store.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::crm::Customer;

#[derive(Clone, Default)]
pub struct CrmStore {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

impl CrmStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, customer: Customer) -> Customer {
        let mut customers = self.customers.write().await;
        customers.insert(customer.id, customer.clone());
        customer
    }

    pub async fn get(&self, company_id: Uuid, customer_id: Uuid) -> Option<Customer> {
        let customers = self.customers.read().await;
        customers
            .get(&customer_id)
            .filter(|c| c.company_id == company_id)
            .cloned()
    }

    pub async fn list(&self, company_id: Uuid) -> Vec<Customer> {
        let customers = self.customers.read().await;
        let mut list: Vec<Customer> = customers
            .values()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Acúmulo de pontos na finalização de venda (única mutação de saldo).
    pub async fn add_points(
        &self,
        company_id: Uuid,
        customer_id: Uuid,
        points: i64,
    ) -> Result<Customer, AppError> {
        let mut customers = self.customers.write().await;
        let customer = customers
            .get_mut(&customer_id)
            .filter(|c| c.company_id == company_id)
            .ok_or(AppError::CustomerNotFound)?;
        customer.points += points;
        Ok(customer.clone())
    }
}
