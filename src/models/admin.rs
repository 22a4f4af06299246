// src/models/admin.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Usuários ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Superadmin,
    Admin,
    Manager,
    Cashier,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    // None = usuário global (console SaaS)
    pub company_id: Option<Uuid>,
    #[schema(example = "Ricardo Admin")]
    pub name: String,
    pub role: UserRole,
    pub email: String,
}

// --- 2. Planos SaaS ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    #[schema(example = "Professional")]
    pub name: String,
    #[schema(example = "199.00")]
    pub price: Decimal,
    pub max_users: u32,
    pub max_products: u32,
    pub max_integrations: u32,
    // ['pos', 'finance', 'inventory', 'api', 'loyalty', 'purchase_orders']
    pub features: Vec<String>,
}

// --- 3. Catálogo global de integrações ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationCategory {
    Delivery,
    Marketplace,
    Erp,
    Marketing,
    Payment,
    Ecommerce,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: Uuid,
    #[schema(example = "iFood")]
    pub name: String,
    #[schema(example = "ifood")]
    pub slug: String,
    pub description: String,
    pub category: IntegrationCategory,
}

// --- 4. Empresa (tenant) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Suspended,
    Trial,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveModules {
    pub inventory: bool,
    pub finance: bool,
    pub loyalty: bool,
    pub ai_insights: bool,
    pub multi_stock: bool,
    pub pos: bool,
    pub purchase_orders: bool,
}

// Configurações da loja, incluindo fidelidade e credenciais de integração.
// Credencial ausente = integração silenciosamente pulada.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub loyalty_enabled: bool,
    #[schema(example = "NaturaPoints")]
    pub loyalty_name: String,
    // A cada loyalty_spend_threshold gastos, ganha loyalty_point_value pontos
    pub loyalty_spend_threshold: Decimal,
    pub loyalty_point_value: i64,
    #[schema(example = "points")]
    pub redemption_type: String,
    #[schema(example = "R$")]
    pub currency_symbol: String,
    pub sales_channels: Vec<String>,

    // Credenciais (opcionais) das integrações
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asaas_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nuvemshop_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nuvemshop_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mercadolivre_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifood_merchant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiny_erp_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_phone_number_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            loyalty_enabled: false,
            loyalty_name: "Pontos".to_string(),
            loyalty_spend_threshold: Decimal::ZERO,
            loyalty_point_value: 0,
            redemption_type: "points".to_string(),
            currency_symbol: "R$".to_string(),
            sales_channels: vec!["Balcão".to_string()],
            asaas_api_key: None,
            nuvemshop_token: None,
            nuvemshop_user_id: None,
            mercadolivre_token: None,
            ifood_merchant_id: None,
            tiny_erp_token: None,
            whatsapp_token: None,
            whatsapp_phone_number_id: None,
            webhook_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    #[schema(example = "matriz")]
    pub subdomain: String,
    #[schema(example = "Natura Loja Matriz")]
    pub name: String,
    #[schema(example = "12.345.678/0001-90")]
    pub cnpj: String,
    pub main_email: String,
    pub plan_id: Uuid,
    pub status: CompanyStatus,
    // Slugs das integrações habilitadas para o tenant
    pub enabled_integrations: Vec<String>,
    pub active_modules: ActiveModules,
    pub settings: StoreSettings,
}
