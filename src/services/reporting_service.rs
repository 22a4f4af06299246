// src/services/reporting_service.rs

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    models::reports::{ChannelSalesEntry, ChurnRiskEntry, DashboardSummary},
    services::{FinanceService, InventoryService},
    store::{CrmStore, SalesStore},
};

// Clientes sem compra há mais de 21 dias entram no radar de churn.
const CHURN_INACTIVITY_DAYS: i64 = 21;

/// Relatórios do painel. Só leituras derivadas: nada aqui muta estado nem
/// bloqueia as operações transacionais.
#[derive(Clone)]
pub struct ReportingService {
    sales: SalesStore,
    inventory: InventoryService,
    finance: FinanceService,
    crm: CrmStore,
}

impl ReportingService {
    pub fn new(
        sales: SalesStore,
        inventory: InventoryService,
        finance: FinanceService,
        crm: CrmStore,
    ) -> Self {
        Self { sales, inventory, finance, crm }
    }

    pub async fn dashboard_summary(&self, company_id: Uuid) -> DashboardSummary {
        let total_sales: Decimal = self
            .sales
            .list(company_id)
            .await
            .iter()
            .map(|s| s.total_amount)
            .sum();

        DashboardSummary {
            total_sales,
            low_stock_alerts: self.inventory.low_stock_products(company_id).await.len() as u32,
            balance: self.finance.summary(company_id).await.balance,
            product_count: self.inventory.list_products(company_id).await.len() as u32,
        }
    }

    /// Faturamento agrupado por canal de origem, maior primeiro.
    pub async fn sales_by_channel(&self, company_id: Uuid) -> Vec<ChannelSalesEntry> {
        let mut by_channel: HashMap<String, Decimal> = HashMap::new();
        for sale in self.sales.list(company_id).await {
            let channel = if sale.origin.is_empty() {
                "Balcão".to_string()
            } else {
                sale.origin
            };
            *by_channel.entry(channel).or_insert(Decimal::ZERO) += sale.total_amount;
        }

        let mut entries: Vec<ChannelSalesEntry> = by_channel
            .into_iter()
            .map(|(channel, total)| ChannelSalesEntry { channel, total })
            .collect();
        entries.sort_by(|a, b| b.total.cmp(&a.total));
        entries
    }

    /// Clientes em risco: última compra há mais de 21 dias, ou nenhuma
    /// compra registrada (days_inactive = None). Mais inativos primeiro.
    pub async fn churn_risk(&self, company_id: Uuid) -> Vec<ChurnRiskEntry> {
        let sales = self.sales.list(company_id).await;
        let now = Utc::now();

        let mut last_purchase: HashMap<Uuid, chrono::DateTime<Utc>> = HashMap::new();
        for sale in &sales {
            if let Some(customer_id) = sale.customer_id {
                let entry = last_purchase.entry(customer_id).or_insert(sale.timestamp);
                if sale.timestamp > *entry {
                    *entry = sale.timestamp;
                }
            }
        }

        let mut entries: Vec<ChurnRiskEntry> = self
            .crm
            .list(company_id)
            .await
            .into_iter()
            .filter_map(|customer| {
                let days_inactive = last_purchase
                    .get(&customer.id)
                    .map(|ts| (now - *ts).num_days());
                match days_inactive {
                    Some(days) if days <= CHURN_INACTIVITY_DAYS => None,
                    days_inactive => Some(ChurnRiskEntry {
                        customer_id: customer.id,
                        customer_name: customer.name,
                        phone: customer.phone,
                        days_inactive,
                    }),
                }
            })
            .collect();

        // None (nunca comprou) vai para o topo
        entries.sort_by(|a, b| match (a.days_inactive, b.days_inactive) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (Some(x), Some(y)) => y.cmp(&x),
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crm::Customer;
    use crate::models::pos::{DocumentType, PaymentMethod, Sale};
    use crate::store::{FinanceStore, InventoryStore};
    use chrono::Duration;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service() -> (ReportingService, SalesStore, CrmStore) {
        let sales = SalesStore::new();
        let crm = CrmStore::new();
        let inventory = InventoryService::new(InventoryStore::new(), sales.clone());
        let finance = FinanceService::new(FinanceStore::new());
        let svc = ReportingService::new(sales.clone(), inventory, finance, crm.clone());
        (svc, sales, crm)
    }

    fn sale(
        company_id: Uuid,
        customer_id: Option<Uuid>,
        origin: &str,
        total: Decimal,
        days_ago: i64,
    ) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            company_id,
            timestamp: Utc::now() - Duration::days(days_ago),
            items: vec![],
            total_amount: total,
            payment_method: PaymentMethod::Pix,
            document_type: DocumentType::Cupom,
            customer_id,
            nf_cpf: None,
            seller_id: Uuid::new_v4(),
            origin: origin.to_string(),
        }
    }

    fn customer(company_id: Uuid, name: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            company_id,
            name: name.into(),
            cpf: String::new(),
            email: String::new(),
            phone: "(11) 90000-0000".into(),
            points: 0,
        }
    }

    #[tokio::test]
    async fn channel_grouping_defaults_to_balcao() {
        let (svc, sales, _) = service();
        let company = Uuid::new_v4();

        sales.append(sale(company, None, "iFood", dec("50"), 0)).await;
        sales.append(sale(company, None, "iFood", dec("30"), 0)).await;
        sales.append(sale(company, None, "", dec("20"), 0)).await;

        let entries = svc.sales_by_channel(company).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].channel, "iFood");
        assert_eq!(entries[0].total, dec("80"));
        assert_eq!(entries[1].channel, "Balcão");
    }

    #[tokio::test]
    async fn churn_flags_inactive_and_never_bought() {
        let (svc, sales, crm) = service();
        let company = Uuid::new_v4();

        let recent = crm.insert(customer(company, "Recente")).await;
        let inactive = crm.insert(customer(company, "Sumida")).await;
        let never = crm.insert(customer(company, "Nunca Comprou")).await;

        sales.append(sale(company, Some(recent.id), "Balcão", dec("10"), 3)).await;
        sales.append(sale(company, Some(inactive.id), "Balcão", dec("10"), 40)).await;
        // Uma compra antiga seguida de uma recente tira do radar
        sales.append(sale(company, Some(recent.id), "Balcão", dec("10"), 60)).await;

        let entries = svc.churn_risk(company).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].customer_id, never.id);
        assert_eq!(entries[0].days_inactive, None);
        assert_eq!(entries[1].customer_id, inactive.id);
        assert_eq!(entries[1].days_inactive, Some(40));
    }

    #[tokio::test]
    async fn dashboard_sums_sales() {
        let (svc, sales, _) = service();
        let company = Uuid::new_v4();

        sales.append(sale(company, None, "Balcão", dec("100.50"), 0)).await;
        sales.append(sale(company, None, "iFood", dec("49.50"), 1)).await;

        let summary = svc.dashboard_summary(company).await;
        assert_eq!(summary.total_sales, dec("150.00"));
        assert_eq!(summary.product_count, 0);
        assert_eq!(summary.balance, Decimal::ZERO);
    }
}
