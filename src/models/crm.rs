// src/models/crm.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Cliente com saldo acumulado de pontos de fidelidade.
// O saldo só muda pelo acúmulo na finalização de venda.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Maria Silva")]
    pub name: String,
    #[schema(example = "123.456.789-00")]
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub points: i64,
}
