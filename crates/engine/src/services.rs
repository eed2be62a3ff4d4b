//! `ServiceBundle` — every backend port (§4.8) the Runtime Core and Node
//! Executor are allowed to call, wired once by the host and shared across
//! a run. Every field is optional except monitoring, which defaults to a
//! no-op so callers don't have to special-case "monitoring isn't
//! configured" at every call site.

use std::sync::Arc;

use nebula_action::StepSeam;
use nebula_ports::{
    CredentialService, CreditService, DatabaseService, DatasetService, DurableStepStore,
    ExecutionStore, MonitoringService, NoopMonitoringService, ObjectStore, QueueService,
};

#[derive(Clone)]
pub struct ServiceBundle {
    pub object_store: Option<Arc<dyn ObjectStore>>,
    pub credential_service: Option<Arc<dyn CredentialService>>,
    pub credit_service: Option<Arc<dyn CreditService>>,
    pub execution_store: Option<Arc<dyn ExecutionStore>>,
    pub monitoring_service: Arc<dyn MonitoringService>,
    pub queue_service: Option<Arc<dyn QueueService>>,
    pub database_service: Option<Arc<dyn DatabaseService>>,
    pub dataset_service: Option<Arc<dyn DatasetService>>,
    pub durable_step_store: Option<Arc<dyn DurableStepStore>>,
}

impl Default for ServiceBundle {
    fn default() -> Self {
        Self {
            object_store: None,
            credential_service: None,
            credit_service: None,
            execution_store: None,
            monitoring_service: Arc::new(NoopMonitoringService),
            queue_service: None,
            database_service: None,
            dataset_service: None,
            durable_step_store: None,
        }
    }
}

impl ServiceBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_object_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(store);
        self
    }

    #[must_use]
    pub fn with_credential_service(mut self, service: Arc<dyn CredentialService>) -> Self {
        self.credential_service = Some(service);
        self
    }

    #[must_use]
    pub fn with_credit_service(mut self, service: Arc<dyn CreditService>) -> Self {
        self.credit_service = Some(service);
        self
    }

    #[must_use]
    pub fn with_execution_store(mut self, store: Arc<dyn ExecutionStore>) -> Self {
        self.execution_store = Some(store);
        self
    }

    #[must_use]
    pub fn with_monitoring_service(mut self, service: Arc<dyn MonitoringService>) -> Self {
        self.monitoring_service = service;
        self
    }

    #[must_use]
    pub fn with_queue_service(mut self, service: Arc<dyn QueueService>) -> Self {
        self.queue_service = Some(service);
        self
    }

    #[must_use]
    pub fn with_database_service(mut self, service: Arc<dyn DatabaseService>) -> Self {
        self.database_service = Some(service);
        self
    }

    #[must_use]
    pub fn with_dataset_service(mut self, service: Arc<dyn DatasetService>) -> Self {
        self.dataset_service = Some(service);
        self
    }

    #[must_use]
    pub fn with_durable_step_store(mut self, store: Arc<dyn DurableStepStore>) -> Self {
        self.durable_step_store = Some(store);
        self
    }

    /// The Durable-Step Seam this bundle implies: durable if a step store
    /// was wired, ephemeral otherwise (§4.7).
    #[must_use]
    pub fn step_seam(&self) -> StepSeam {
        match &self.durable_step_store {
            Some(store) => StepSeam::Durable(store.clone()),
            None => StepSeam::Ephemeral,
        }
    }
}
