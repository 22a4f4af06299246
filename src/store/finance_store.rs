// src/store/finance_store.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::finance::FinancialTransaction;

// Lançamentos financeiros: registros planos, append-only.
#[derive(Clone, Default)]
pub struct FinanceStore {
    transactions: Arc<RwLock<Vec<FinancialTransaction>>>,
}

impl FinanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, transaction: FinancialTransaction) -> FinancialTransaction {
        let mut transactions = self.transactions.write().await;
        transactions.push(transaction.clone());
        transaction
    }

    pub async fn list(&self, company_id: Uuid) -> Vec<FinancialTransaction> {
        let transactions = self.transactions.read().await;
        transactions
            .iter()
            .filter(|t| t.company_id == company_id)
            .cloned()
            .collect()
    }
}
