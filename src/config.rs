// src/config.rs

use std::env;

use crate::{
    common::i18n::MessageCatalog,
    services::{
        AdminService, CrmService, FinanceService, InsightService, IntegrationService,
        InventoryService, PosService, PurchasingService, ReportingService,
    },
    store::{
        AdminStore, AuditStore, CartStore, CrmStore, FinanceStore, InventoryStore,
        PurchasingStore, SalesStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub inventory_service: InventoryService,
    pub pos_service: PosService,
    pub reporting_service: ReportingService,
    pub crm_service: CrmService,
    pub finance_service: FinanceService,
    pub purchasing_service: PurchasingService,
    pub admin_service: AdminService,
    pub insight_service: InsightService,
    pub i18n_store: MessageCatalog,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Credencial do provedor de insights é opcional: sem ela o serviço
        // devolve o texto de indisponibilidade.
        let insight_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        // --- Estado em memória (um por processo) ---
        let inventory_store = InventoryStore::new();
        let sales_store = SalesStore::new();
        let cart_store = CartStore::new();
        let crm_store = CrmStore::new();
        let finance_store = FinanceStore::new();
        let purchasing_store = PurchasingStore::new();
        let admin_store = AdminStore::new();
        let audit_store = AuditStore::new();

        // --- Monta o gráfico de dependências ---
        let integration_service = IntegrationService::new();
        let inventory_service =
            InventoryService::new(inventory_store.clone(), sales_store.clone());
        let finance_service = FinanceService::new(finance_store.clone());
        let crm_service = CrmService::new(crm_store.clone(), sales_store.clone());
        let purchasing_service =
            PurchasingService::new(purchasing_store.clone(), inventory_service.clone());
        let reporting_service = ReportingService::new(
            sales_store.clone(),
            inventory_service.clone(),
            finance_service.clone(),
            crm_store.clone(),
        );
        let pos_service = PosService::new(
            cart_store,
            sales_store.clone(),
            inventory_service.clone(),
            crm_store.clone(),
            finance_store.clone(),
            admin_store.clone(),
            audit_store.clone(),
            integration_service,
        );
        let admin_service = AdminService::new(
            admin_store,
            inventory_store,
            sales_store,
            crm_store,
            finance_store,
            purchasing_store,
            audit_store,
        );
        let insight_service = InsightService::new(inventory_service.clone(), insight_api_key);

        Ok(Self {
            inventory_service,
            pos_service,
            reporting_service,
            crm_service,
            finance_service,
            purchasing_service,
            admin_service,
            insight_service,
            i18n_store: MessageCatalog::new(),
        })
    }
}
