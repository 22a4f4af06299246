// src/store/admin_store.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::admin::{Company, Integration, Plan, StoreSettings, User};

// Coleções do console SaaS: empresas (tenants), planos, usuários e o
// catálogo global de integrações disponíveis.
#[derive(Clone, Default)]
pub struct AdminStore {
    companies: Arc<RwLock<HashMap<Uuid, Company>>>,
    plans: Arc<RwLock<HashMap<Uuid, Plan>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    integrations: Arc<RwLock<Vec<Integration>>>,
}

impl AdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Empresas ---

    pub async fn insert_company(&self, company: Company) -> Company {
        let mut companies = self.companies.write().await;
        companies.insert(company.id, company.clone());
        company
    }

    pub async fn get_company(&self, company_id: Uuid) -> Result<Company, AppError> {
        let companies = self.companies.read().await;
        companies
            .get(&company_id)
            .cloned()
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn list_companies(&self) -> Vec<Company> {
        let companies = self.companies.read().await;
        let mut list: Vec<Company> = companies.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    pub async fn subdomain_exists(&self, subdomain: &str) -> bool {
        let companies = self.companies.read().await;
        companies.values().any(|c| c.subdomain == subdomain)
    }

    pub async fn update_company(&self, company: Company) -> Result<Company, AppError> {
        let mut companies = self.companies.write().await;
        match companies.get_mut(&company.id) {
            Some(entry) => {
                *entry = company.clone();
                Ok(company)
            }
            None => Err(AppError::CompanyNotFound),
        }
    }

    pub async fn update_settings(
        &self,
        company_id: Uuid,
        settings: StoreSettings,
    ) -> Result<Company, AppError> {
        let mut companies = self.companies.write().await;
        let company = companies
            .get_mut(&company_id)
            .ok_or(AppError::CompanyNotFound)?;
        company.settings = settings;
        Ok(company.clone())
    }

    // --- Planos ---

    pub async fn insert_plan(&self, plan: Plan) -> Plan {
        let mut plans = self.plans.write().await;
        plans.insert(plan.id, plan.clone());
        plan
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> Result<Plan, AppError> {
        let plans = self.plans.read().await;
        plans.get(&plan_id).cloned().ok_or(AppError::PlanNotFound)
    }

    pub async fn list_plans(&self) -> Vec<Plan> {
        let plans = self.plans.read().await;
        let mut list: Vec<Plan> = plans.values().cloned().collect();
        list.sort_by(|a, b| a.price.cmp(&b.price));
        list
    }

    pub async fn update_plan(&self, plan: Plan) -> Result<Plan, AppError> {
        let mut plans = self.plans.write().await;
        match plans.get_mut(&plan.id) {
            Some(entry) => {
                *entry = plan.clone();
                Ok(plan)
            }
            None => Err(AppError::PlanNotFound),
        }
    }

    // --- Usuários ---

    pub async fn insert_user(&self, user: User) -> User {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        user
    }

    pub async fn list_users(&self, company_id: Option<Uuid>) -> Vec<User> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users
            .values()
            .filter(|u| company_id.is_none() || u.company_id == company_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    // --- Integrações (catálogo global) ---

    pub async fn set_integrations(&self, catalog: Vec<Integration>) {
        let mut integrations = self.integrations.write().await;
        *integrations = catalog;
    }

    pub async fn list_integrations(&self) -> Vec<Integration> {
        let integrations = self.integrations.read().await;
        integrations.clone()
    }
}
