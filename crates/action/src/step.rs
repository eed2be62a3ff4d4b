//! The Durable-Step Seam (§4.7).
//!
//! Every node invocation, and every internal step of a multi-step node,
//! goes through one of these two implementations. Step names are
//! deterministic so that replaying a durable execution re-derives the
//! same name and gets back the persisted value instead of re-running the
//! step's closure.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use nebula_ports::DurableStepStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ActionError;

/// Default step timeout when a host doesn't configure one (§4.7).
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Dispatches `executeStep(name, fn) -> value` to either direct execution
/// or a durable store, per §4.7.
#[derive(Clone)]
pub enum StepSeam {
    /// Calls the closure directly. No persistence, no retry; errors
    /// propagate as-is.
    Ephemeral,
    /// Persists the closure's result under its step name via a
    /// host-provided [`DurableStepStore`]. Replaying the same name
    /// returns the persisted value without re-invoking the closure.
    Durable(Arc<dyn DurableStepStore>),
}

impl StepSeam {
    /// Execute `name` via `f`, applying §4.7's durability contract.
    ///
    /// Every await that could hang — the closure itself, and the durable
    /// store's load/store round trip — is bounded by
    /// [`DEFAULT_STEP_TIMEOUT`]. An elapsed timeout becomes
    /// `ActionError::Timeout` rather than blocking the caller forever, so
    /// a hung node upgrades to an `error` result (§4.6/§7) instead of
    /// stalling its whole level.
    pub async fn execute_step<T, F, Fut>(&self, name: &str, f: F) -> Result<T, ActionError>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, ActionError>> + Send,
    {
        match self {
            Self::Ephemeral => Self::bounded(name, f()).await,
            Self::Durable(store) => {
                let cached = Self::bounded(name, async {
                    store.load(name).await.map_err(ActionError::from)
                })
                .await?;
                if let Some(cached) = cached {
                    return serde_json::from_value(cached).map_err(|e| {
                        ActionError::fatal(format!("durable step `{name}` result decode failed: {e}"))
                    });
                }
                let value = Self::bounded(name, f()).await?;
                let encoded = serde_json::to_value(&value).map_err(|e| {
                    ActionError::fatal(format!("durable step `{name}` result encode failed: {e}"))
                })?;
                Self::bounded(name, async {
                    store.store(name, &encoded).await.map_err(ActionError::from)
                })
                .await?;
                Ok(value)
            }
        }
    }

    /// Race `fut` against [`DEFAULT_STEP_TIMEOUT`], converting an elapsed
    /// timeout into `ActionError::Timeout` named after `name`.
    async fn bounded<T, Fut>(name: &str, fut: Fut) -> Result<T, ActionError>
    where
        Fut: Future<Output = Result<T, ActionError>>,
    {
        match tokio::time::timeout(DEFAULT_STEP_TIMEOUT, fut).await {
            Ok(result) => result,
            Err(_) => Err(ActionError::step_timeout(name)),
        }
    }

    /// Sleep for `duration`. On the durable implementation a real host
    /// would suspend the workflow rather than block a worker thread;
    /// this in-process implementation sleeps the calling task either way.
    pub async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
