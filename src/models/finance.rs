// src/models/finance.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,  // Entrada
    Expense, // Saída
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTransaction {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[schema(example = "Vendas")]
    pub category: String,
    #[schema(example = "Venda PDV - 25/10")]
    pub description: String,
    // Sempre magnitude positiva; o sinal vem do kind.
    #[schema(example = "450.00")]
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

// Saldo = soma(income) - soma(expense)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}
