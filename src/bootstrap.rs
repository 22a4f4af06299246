// src/bootstrap.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    config::AppState,
    models::admin::{CompanyStatus, Integration, IntegrationCategory, StoreSettings, UserRole},
    models::finance::TransactionKind,
    models::inventory::ProductUnit,
    services::admin_service::{NewCompany, NewPlan, NewUser},
    services::crm_service::NewCustomer,
    services::finance_service::NewTransaction,
    services::inventory_service::NewProduct,
    services::purchasing_service::NewSupplier,
};

fn dec(s: &str) -> Decimal {
    s.parse().expect("literal decimal inválido no seed")
}

/// Popula o estado em memória com a loja demonstrativa. Todo o estado vive
/// no processo, então cada inicialização recomeça exatamente daqui.
pub async fn seed(state: &AppState) -> anyhow::Result<()> {
    // --- Catálogo global de integrações ---
    let integrations = [
        ("iFood", "ifood", "Receba pedidos de delivery diretamente no seu PDV.", IntegrationCategory::Delivery),
        ("Mercado Livre", "mercadolivre", "Sincronize seu estoque e anuncie seus kits de produtos naturais.", IntegrationCategory::Marketplace),
        ("Asaas Payments", "asaas", "Geração de boletos e cobrança recorrente automatizada.", IntegrationCategory::Payment),
        ("Tiny ERP", "tiny", "Sincronização fiscal e contábil avançada para grandes volumes.", IntegrationCategory::Erp),
        ("WhatsApp Business", "whatsapp", "Envie comprovantes e ofertas personalizadas pelo zap.", IntegrationCategory::Marketing),
        ("Nuvemshop", "nuvemshop", "Venda seus produtos naturais online com estoque sincronizado.", IntegrationCategory::Ecommerce),
    ];
    state
        .admin_service
        .set_integration_catalog(
            integrations
                .into_iter()
                .map(|(name, slug, description, category)| Integration {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    slug: slug.to_string(),
                    description: description.to_string(),
                    category,
                })
                .collect(),
        )
        .await;

    // --- Planos ---
    let _starter = state
        .admin_service
        .create_plan(NewPlan {
            name: "Starter".into(),
            price: dec("99"),
            max_users: 2,
            max_products: 100,
            max_integrations: 0,
            features: vec!["pos".into(), "inventory".into()],
        })
        .await;
    state
        .admin_service
        .create_plan(NewPlan {
            name: "Professional".into(),
            price: dec("199"),
            max_users: 5,
            max_products: 1000,
            max_integrations: 2,
            features: vec![
                "pos".into(),
                "inventory".into(),
                "finance".into(),
                "loyalty".into(),
                "purchase_orders".into(),
            ],
        })
        .await;
    let enterprise = state
        .admin_service
        .create_plan(NewPlan {
            name: "Enterprise".into(),
            price: dec("499"),
            max_users: 99,
            max_products: 99999,
            max_integrations: 99,
            features: vec![
                "pos".into(),
                "inventory".into(),
                "finance".into(),
                "loyalty".into(),
                "ai_insights".into(),
                "multi_stock".into(),
                "api".into(),
                "purchase_orders".into(),
            ],
        })
        .await;

    // --- A loja matriz ---
    let company = state
        .admin_service
        .create_company(NewCompany {
            subdomain: "matriz".into(),
            name: "Natura Loja Matriz".into(),
            cnpj: "12.345.678/0001-90".into(),
            main_email: "financeiro@naturamatriz.com.br".into(),
            plan_id: enterprise.id,
        })
        .await?;
    let company_id = company.id;

    state
        .admin_service
        .update_company_status(company_id, CompanyStatus::Active)
        .await?;
    state
        .admin_service
        .set_enabled_integrations(
            company_id,
            ["ifood", "whatsapp", "tiny", "asaas", "nuvemshop", "mercadolivre"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .await?;
    state
        .admin_service
        .update_settings(
            company_id,
            StoreSettings {
                loyalty_enabled: true,
                loyalty_name: "NaturaPoints".into(),
                loyalty_spend_threshold: dec("10"),
                loyalty_point_value: 1,
                redemption_type: "points".into(),
                currency_symbol: "R$".into(),
                sales_channels: vec![
                    "Balcão".into(),
                    "WhatsApp".into(),
                    "iFood".into(),
                    "Mercado Livre".into(),
                ],
                ..StoreSettings::default()
            },
        )
        .await?;

    // --- Usuários ---
    for (name, role, email) in [
        ("Ricardo Admin", UserRole::Admin, "ricardo@naturascale.com"),
        ("Ana Gerente", UserRole::Manager, "ana@naturascale.com"),
        ("João Caixa", UserRole::Cashier, "joao@naturascale.com"),
    ] {
        state
            .admin_service
            .create_user(NewUser {
                company_id: Some(company_id),
                name: name.into(),
                role,
                email: email.into(),
            })
            .await?;
    }

    // --- Catálogo inicial (saldos depósito/gôndola já separados) ---
    type SeedProduct = (
        &'static str, &'static str, ProductUnit,
        &'static str, &'static str, &'static str, &'static str, &'static str,
        &'static str, &'static str, &'static str,
    );
    let products: [SeedProduct; 5] = [
        ("Castanha do Pará Inteira", "Oleaginosas", ProductUnit::Kg, "85.00", "12.5", "2.5", "10", "2", "CP-001", "101", "200010100000"),
        ("Granola Artesanal", "Cereais", ProductUnit::Kg, "32.50", "8.0", "2.0", "15", "3", "GR-002", "102", "200010200000"),
        ("Chá de Hibisco", "Chás", ProductUnit::Kg, "45.00", "2.1", "0.5", "5", "1", "CH-003", "103", "200010300000"),
        ("Barra de Cereal Nutry", "Snacks", ProductUnit::Un, "4.50", "48", "12", "50", "10", "BC-004", "", "789123456789"),
        ("Mel Orgânico 500g", "Adoçantes", ProductUnit::Un, "35.00", "20", "10", "10", "5", "MO-005", "", "789987654321"),
    ];
    for (name, category, unit, price, warehouse, store, min_wh, min_st, sku, scale_code, barcode) in
        products
    {
        state
            .inventory_service
            .create_product(
                company_id,
                NewProduct {
                    name: name.into(),
                    category: category.into(),
                    unit,
                    price_per_unit: dec(price),
                    channel_prices: HashMap::new(),
                    cost_price: None,
                    initial_warehouse_stock: dec(warehouse),
                    initial_store_stock: dec(store),
                    min_stock_warehouse: dec(min_wh),
                    min_stock_store: dec(min_st),
                    sku: sku.into(),
                    scale_code: scale_code.into(),
                    barcode: Some(barcode.into()),
                    image_url: None,
                    next_expiration_date: None,
                },
            )
            .await?;
    }

    // --- Clientes ---
    for (name, cpf, email, phone) in [
        ("Maria Silva", "123.456.789-00", "maria@email.com", "(11) 98888-7777"),
        ("José Santos", "987.654.321-11", "jose@email.com", "(11) 97777-6666"),
    ] {
        state
            .crm_service
            .create_customer(
                company_id,
                NewCustomer {
                    name: name.into(),
                    cpf: cpf.into(),
                    email: email.into(),
                    phone: phone.into(),
                },
            )
            .await?;
    }

    // --- Lançamentos financeiros ---
    for (kind, category, description, amount) in [
        (TransactionKind::Expense, "Fornecedores", "Compra de Oleaginosas", "1200.00"),
        (TransactionKind::Income, "Vendas", "Venda PDV - 25/10", "450.00"),
        (TransactionKind::Expense, "Aluguel", "Aluguel Mensal", "2500.00"),
    ] {
        state
            .finance_service
            .record_transaction(
                company_id,
                NewTransaction {
                    kind,
                    category: category.into(),
                    description: description.into(),
                    amount: dec(amount),
                },
            )
            .await?;
    }

    // --- Fornecedor ---
    state
        .purchasing_service
        .create_supplier(
            company_id,
            NewSupplier {
                name: "Bio Distribuidora".into(),
                cnpj: "44.333.222/0001-11".into(),
                email: "vendas@biodistribuidora.com.br".into(),
                phone: "(11) 3333-2222".into(),
                category: "Oleaginosas e Grãos".into(),
            },
        )
        .await?;

    tracing::info!(%company_id, "loja matriz semeada em memória");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_builds_a_complete_store() {
        let state = AppState::new().unwrap();
        seed(&state).await.unwrap();

        let companies = state.admin_service.list_companies().await;
        assert_eq!(companies.len(), 1);
        let company = &companies[0];
        assert_eq!(company.subdomain, "matriz");
        assert_eq!(company.status, CompanyStatus::Active);
        assert!(company.settings.loyalty_enabled);

        assert_eq!(state.admin_service.list_plans().await.len(), 3);
        assert_eq!(state.admin_service.list_integrations().await.len(), 6);
        assert_eq!(state.inventory_service.list_products(company.id).await.len(), 5);
        assert_eq!(state.crm_service.list_customers(company.id).await.len(), 2);
        assert_eq!(state.finance_service.list_transactions(company.id).await.len(), 3);
        assert_eq!(state.purchasing_service.list_suppliers(company.id).await.len(), 1);

        // Granola e Chá já nascem abaixo dos limiares
        assert!(!state.inventory_service.stock_alerts(company.id).await.is_empty());
    }
}
