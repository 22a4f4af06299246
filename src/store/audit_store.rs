// src/store/audit_store.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::audit::AuditLog;

// Trilha de auditoria append-only.
#[derive(Clone, Default)]
pub struct AuditStore {
    logs: Arc<RwLock<Vec<AuditLog>>>,
}

impl AuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, log: AuditLog) {
        let mut logs = self.logs.write().await;
        logs.push(log);
    }

    pub async fn list(&self, company_id: Uuid) -> Vec<AuditLog> {
        let logs = self.logs.read().await;
        let mut list: Vec<AuditLog> = logs
            .iter()
            .filter(|l| l.company_id == company_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list
    }
}
