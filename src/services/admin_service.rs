// src/services/admin_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::admin::{
        ActiveModules, Company, CompanyStatus, Integration, Plan, StoreSettings, User, UserRole,
    },
    store::{
        AdminStore, AuditStore, CrmStore, FinanceStore, InventoryStore, PurchasingStore,
        SalesStore,
    },
};

/// Console SaaS: empresas (tenants), planos, usuários, configurações da
/// loja e o backup completo de um tenant.
#[derive(Clone)]
pub struct AdminService {
    store: AdminStore,
    inventory: InventoryStore,
    sales: SalesStore,
    crm: CrmStore,
    finance: FinanceStore,
    purchasing: PurchasingStore,
    audit: AuditStore,
}

pub struct NewCompany {
    pub subdomain: String,
    pub name: String,
    pub cnpj: String,
    pub main_email: String,
    pub plan_id: Uuid,
}

pub struct NewPlan {
    pub name: String,
    pub price: Decimal,
    pub max_users: u32,
    pub max_products: u32,
    pub max_integrations: u32,
    pub features: Vec<String>,
}

pub struct NewUser {
    pub company_id: Option<Uuid>,
    pub name: String,
    pub role: UserRole,
    pub email: String,
}

impl AdminService {
    pub fn new(
        store: AdminStore,
        inventory: InventoryStore,
        sales: SalesStore,
        crm: CrmStore,
        finance: FinanceStore,
        purchasing: PurchasingStore,
        audit: AuditStore,
    ) -> Self {
        Self { store, inventory, sales, crm, finance, purchasing, audit }
    }

    // --- Empresas ---

    /// Cria o tenant em trial, com todos os módulos ligados e configurações
    /// padrão. Subdomínio é a chave pública do tenant e não se repete.
    pub async fn create_company(&self, new: NewCompany) -> Result<Company, AppError> {
        let subdomain = new.subdomain.trim().to_lowercase();
        if subdomain.is_empty() {
            return Err(AppError::InvalidInput("subdomínio é obrigatório"));
        }
        if self.store.subdomain_exists(&subdomain).await {
            return Err(AppError::SubdomainTaken);
        }
        // Plano precisa existir
        self.store.get_plan(new.plan_id).await?;

        Ok(self
            .store
            .insert_company(Company {
                id: Uuid::new_v4(),
                subdomain,
                name: new.name,
                cnpj: new.cnpj,
                main_email: new.main_email,
                plan_id: new.plan_id,
                status: CompanyStatus::Trial,
                enabled_integrations: vec![],
                active_modules: ActiveModules {
                    inventory: true,
                    finance: true,
                    loyalty: true,
                    ai_insights: true,
                    multi_stock: true,
                    pos: true,
                    purchase_orders: true,
                },
                settings: StoreSettings::default(),
            })
            .await)
    }

    pub async fn list_companies(&self) -> Vec<Company> {
        self.store.list_companies().await
    }

    pub async fn get_company(&self, company_id: Uuid) -> Result<Company, AppError> {
        self.store.get_company(company_id).await
    }

    pub async fn update_company_status(
        &self,
        company_id: Uuid,
        status: CompanyStatus,
    ) -> Result<Company, AppError> {
        let mut company = self.store.get_company(company_id).await?;
        company.status = status;
        self.store.update_company(company).await
    }

    pub async fn set_enabled_integrations(
        &self,
        company_id: Uuid,
        slugs: Vec<String>,
    ) -> Result<Company, AppError> {
        let catalog = self.store.list_integrations().await;
        for slug in &slugs {
            if !catalog.iter().any(|i| &i.slug == slug) {
                return Err(AppError::InvalidInput("integração desconhecida"));
            }
        }
        let mut company = self.store.get_company(company_id).await?;
        company.enabled_integrations = slugs;
        self.store.update_company(company).await
    }

    // --- Configurações da loja ---

    pub async fn get_settings(&self, company_id: Uuid) -> Result<StoreSettings, AppError> {
        Ok(self.store.get_company(company_id).await?.settings)
    }

    pub async fn update_settings(
        &self,
        company_id: Uuid,
        settings: StoreSettings,
    ) -> Result<Company, AppError> {
        if settings.loyalty_enabled && settings.loyalty_spend_threshold <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "fidelidade ativa exige limiar de gasto positivo",
            ));
        }
        self.store.update_settings(company_id, settings).await
    }

    // --- Planos ---

    pub async fn create_plan(&self, new: NewPlan) -> Plan {
        self.store
            .insert_plan(Plan {
                id: Uuid::new_v4(),
                name: new.name,
                price: new.price,
                max_users: new.max_users,
                max_products: new.max_products,
                max_integrations: new.max_integrations,
                features: new.features,
            })
            .await
    }

    pub async fn list_plans(&self) -> Vec<Plan> {
        self.store.list_plans().await
    }

    pub async fn update_plan(&self, plan: Plan) -> Result<Plan, AppError> {
        self.store.update_plan(plan).await
    }

    // --- Usuários ---

    pub async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        if let Some(company_id) = new.company_id {
            self.store.get_company(company_id).await?;
        }
        Ok(self
            .store
            .insert_user(User {
                id: Uuid::new_v4(),
                company_id: new.company_id,
                name: new.name,
                role: new.role,
                email: new.email,
            })
            .await)
    }

    pub async fn list_users(&self, company_id: Option<Uuid>) -> Vec<User> {
        self.store.list_users(company_id).await
    }

    // --- Catálogo global de integrações ---

    pub async fn set_integration_catalog(&self, catalog: Vec<Integration>) {
        self.store.set_integrations(catalog).await;
    }

    pub async fn list_integrations(&self) -> Vec<Integration> {
        self.store.list_integrations().await
    }

    // --- Auditoria ---

    pub async fn list_audit_logs(&self, company_id: Uuid) -> Vec<crate::models::audit::AuditLog> {
        self.audit.list(company_id).await
    }

    // --- Backup ---

    /// Backup Completo: todas as coleções do tenant num único documento
    /// JSON, pronto para download.
    pub async fn backup(&self, company_id: Uuid) -> Result<serde_json::Value, AppError> {
        let company = self.store.get_company(company_id).await?;

        Ok(json!({
            "generatedAt": Utc::now(),
            "company": company,
            "products": self.inventory.list_products(company_id).await,
            "stockMovements": self.inventory.list_movements(company_id).await,
            "sales": self.sales.list(company_id).await,
            "customers": self.crm.list(company_id).await,
            "transactions": self.finance.list(company_id).await,
            "suppliers": self.purchasing.list_suppliers(company_id).await,
            "purchaseOrders": self.purchasing.list_orders(company_id).await,
            "auditLogs": self.audit.list(company_id).await,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service() -> AdminService {
        AdminService::new(
            AdminStore::new(),
            InventoryStore::new(),
            SalesStore::new(),
            CrmStore::new(),
            FinanceStore::new(),
            PurchasingStore::new(),
            AuditStore::new(),
        )
    }

    async fn seed_plan(svc: &AdminService) -> Plan {
        svc.create_plan(NewPlan {
            name: "Professional".into(),
            price: dec("199.00"),
            max_users: 10,
            max_products: 1000,
            max_integrations: 5,
            features: vec!["pos".into(), "finance".into(), "loyalty".into()],
        })
        .await
    }

    fn new_company(plan_id: Uuid, subdomain: &str) -> NewCompany {
        NewCompany {
            subdomain: subdomain.into(),
            name: "Empório Teste".into(),
            cnpj: "11.222.333/0001-44".into(),
            main_email: "dono@emporio.example".into(),
            plan_id,
        }
    }

    #[tokio::test]
    async fn subdomain_must_be_unique() {
        let svc = service();
        let plan = seed_plan(&svc).await;

        svc.create_company(new_company(plan.id, "matriz")).await.unwrap();
        let err = svc
            .create_company(new_company(plan.id, "Matriz"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SubdomainTaken));
    }

    #[tokio::test]
    async fn company_needs_an_existing_plan() {
        let svc = service();
        let err = svc
            .create_company(new_company(Uuid::new_v4(), "filial"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PlanNotFound));
    }

    #[tokio::test]
    async fn status_transitions_persist() {
        let svc = service();
        let plan = seed_plan(&svc).await;
        let company = svc.create_company(new_company(plan.id, "matriz")).await.unwrap();
        assert_eq!(company.status, CompanyStatus::Trial);

        let updated = svc
            .update_company_status(company.id, CompanyStatus::Suspended)
            .await
            .unwrap();
        assert_eq!(updated.status, CompanyStatus::Suspended);
    }

    #[tokio::test]
    async fn loyalty_settings_need_positive_threshold() {
        let svc = service();
        let plan = seed_plan(&svc).await;
        let company = svc.create_company(new_company(plan.id, "matriz")).await.unwrap();

        let mut settings = StoreSettings::default();
        settings.loyalty_enabled = true;
        settings.loyalty_spend_threshold = Decimal::ZERO;

        let err = svc.update_settings(company.id, settings).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn backup_has_all_collections() {
        let svc = service();
        let plan = seed_plan(&svc).await;
        let company = svc.create_company(new_company(plan.id, "matriz")).await.unwrap();

        let backup = svc.backup(company.id).await.unwrap();
        for key in [
            "company",
            "products",
            "stockMovements",
            "sales",
            "customers",
            "transactions",
            "suppliers",
            "purchaseOrders",
            "auditLogs",
        ] {
            assert!(backup.get(key).is_some(), "faltou a coleção {key}");
        }
        assert_eq!(backup["company"]["subdomain"], "matriz");
    }

    #[tokio::test]
    async fn global_users_live_outside_any_tenant() {
        let svc = service();
        let user = svc
            .create_user(NewUser {
                company_id: None,
                name: "Root SaaS".into(),
                role: UserRole::Superadmin,
                email: "root@naturascale.example".into(),
            })
            .await
            .unwrap();

        assert!(svc.list_users(None).await.iter().any(|u| u.id == user.id));
    }
}
