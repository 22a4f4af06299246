// src/services/crm_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{crm::Customer, pos::Sale},
    store::{CrmStore, SalesStore},
};

/// Cadastro de clientes. O saldo de pontos só muda pela finalização de
/// venda (PosService); aqui é só CRUD e consulta de histórico.
#[derive(Clone)]
pub struct CrmService {
    store: CrmStore,
    sales: SalesStore,
}

pub struct NewCustomer {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
}

impl CrmService {
    pub fn new(store: CrmStore, sales: SalesStore) -> Self {
        Self { store, sales }
    }

    pub async fn create_customer(
        &self,
        company_id: Uuid,
        new: NewCustomer,
    ) -> Result<Customer, AppError> {
        if new.name.trim().is_empty() {
            return Err(AppError::InvalidInput("nome do cliente é obrigatório"));
        }

        Ok(self
            .store
            .insert(Customer {
                id: Uuid::new_v4(),
                company_id,
                name: new.name,
                cpf: new.cpf,
                email: new.email,
                phone: new.phone,
                points: 0,
            })
            .await)
    }

    pub async fn get_customer(
        &self,
        company_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Customer, AppError> {
        self.store
            .get(company_id, customer_id)
            .await
            .ok_or(AppError::CustomerNotFound)
    }

    pub async fn list_customers(&self, company_id: Uuid) -> Vec<Customer> {
        self.store.list(company_id).await
    }

    /// Compras do cliente, mais recentes primeiro.
    pub async fn purchase_history(
        &self,
        company_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Vec<Sale>, AppError> {
        self.get_customer(company_id, customer_id).await?;
        let mut sales: Vec<Sale> = self
            .sales
            .list(company_id)
            .await
            .into_iter()
            .filter(|s| s.customer_id == Some(customer_id))
            .collect();
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_customer_starts_with_zero_points() {
        let svc = CrmService::new(CrmStore::new(), SalesStore::new());
        let company = Uuid::new_v4();

        let customer = svc
            .create_customer(
                company,
                NewCustomer {
                    name: "João Souza".into(),
                    cpf: "987.654.321-00".into(),
                    email: "joao@example.com".into(),
                    phone: "(21) 97777-6666".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(customer.points, 0);
        assert_eq!(svc.list_customers(company).await.len(), 1);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let svc = CrmService::new(CrmStore::new(), SalesStore::new());
        let err = svc
            .create_customer(
                Uuid::new_v4(),
                NewCustomer {
                    name: "   ".into(),
                    cpf: String::new(),
                    email: String::new(),
                    phone: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn history_of_unknown_customer_is_not_found() {
        let svc = CrmService::new(CrmStore::new(), SalesStore::new());
        let err = svc
            .purchase_history(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CustomerNotFound));
    }
}
