// src/services/finance_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{FinanceSummary, FinancialTransaction, TransactionKind},
    store::FinanceStore,
};

/// Fluxo de caixa: lançamentos manuais e o resumo entrada/saída/saldo.
/// As receitas de venda entram por aqui também, lançadas pelo PosService.
#[derive(Clone)]
pub struct FinanceService {
    store: FinanceStore,
}

pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
}

impl FinanceService {
    pub fn new(store: FinanceStore) -> Self {
        Self { store }
    }

    /// O valor é sempre a magnitude positiva; o sinal vem do tipo.
    pub async fn record_transaction(
        &self,
        company_id: Uuid,
        new: NewTransaction,
    ) -> Result<FinancialTransaction, AppError> {
        if new.amount <= Decimal::ZERO {
            return Err(AppError::InvalidInput("valor deve ser positivo"));
        }

        Ok(self
            .store
            .append(FinancialTransaction {
                id: Uuid::new_v4(),
                company_id,
                kind: new.kind,
                category: new.category,
                description: new.description,
                amount: new.amount,
                timestamp: Utc::now(),
            })
            .await)
    }

    pub async fn list_transactions(&self, company_id: Uuid) -> Vec<FinancialTransaction> {
        let mut transactions = self.store.list(company_id).await;
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        transactions
    }

    pub async fn summary(&self, company_id: Uuid) -> FinanceSummary {
        let transactions = self.store.list(company_id).await;
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        for t in &transactions {
            match t.kind {
                TransactionKind::Income => total_income += t.amount,
                TransactionKind::Expense => total_expense += t.amount,
            }
        }
        FinanceSummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn summary_is_income_minus_expense() {
        let svc = FinanceService::new(FinanceStore::new());
        let company = Uuid::new_v4();

        svc.record_transaction(
            company,
            NewTransaction {
                kind: TransactionKind::Income,
                category: "Vendas".into(),
                description: "Venda PDV - 25/08".into(),
                amount: dec("450.00"),
            },
        )
        .await
        .unwrap();

        svc.record_transaction(
            company,
            NewTransaction {
                kind: TransactionKind::Expense,
                category: "Fornecedores".into(),
                description: "Pagamento Bio Distribuidora".into(),
                amount: dec("120.50"),
            },
        )
        .await
        .unwrap();

        let summary = svc.summary(company).await;
        assert_eq!(summary.total_income, dec("450.00"));
        assert_eq!(summary.total_expense, dec("120.50"));
        assert_eq!(summary.balance, dec("329.50"));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let svc = FinanceService::new(FinanceStore::new());
        let err = svc
            .record_transaction(
                Uuid::new_v4(),
                NewTransaction {
                    kind: TransactionKind::Expense,
                    category: "Outros".into(),
                    description: String::new(),
                    amount: dec("-5"),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn tenants_do_not_leak_into_each_other() {
        let svc = FinanceService::new(FinanceStore::new());
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        svc.record_transaction(
            a,
            NewTransaction {
                kind: TransactionKind::Income,
                category: "Vendas".into(),
                description: String::new(),
                amount: dec("10"),
            },
        )
        .await
        .unwrap();

        assert_eq!(svc.list_transactions(a).await.len(), 1);
        assert!(svc.list_transactions(b).await.is_empty());
        assert_eq!(svc.summary(b).await.balance, Decimal::ZERO);
    }
}
