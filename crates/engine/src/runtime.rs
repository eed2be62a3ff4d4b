//! The Runtime Core (§4.6): the outer `run` loop.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use nebula_core::{DeploymentId, ExecutionId, NodeId, OrganizationId};
use nebula_execution::{
    ExecutionState, NodeExecution, NodeStatus, WorkflowExecution, WorkflowExecutionContext,
    get_execution_status, snapshot,
};
use nebula_ports::CreditCheck;
use nebula_workflow::{Workflow, plan, validate};
use tokio_util::sync::CancellationToken;

use crate::error::EngineError;
use crate::node_executor::execute_node;
use crate::services::ServiceBundle;

/// Per-run inputs the host supplies that aren't derivable from the
/// workflow definition itself: identity, credit-plan facts, and tuning
/// knobs.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub organization_id: OrganizationId,
    pub execution_id: ExecutionId,
    pub deployment_id: Option<DeploymentId>,
    /// Credits included in the organization's current plan, for the
    /// pre-flight check (§4.6 step 3).
    pub included_credits: i64,
    pub subscription_status: Option<String>,
    pub overage_limit: Option<i64>,
    /// Caps how many nodes within a single level run concurrently.
    /// Defaults to the level's full width when `None` (§5: "bounded
    /// parallelism within a level").
    pub concurrency_limit: Option<usize>,
    pub monitoring_session_id: Option<String>,
    /// The cancellation signal for this run. Cloned into every node's
    /// [`nebula_action::ActionContext`] so a host holding onto this same
    /// token can cancel in-flight nodes cooperatively (§5); the level
    /// loop also checks it between levels so no new level starts once
    /// cancelled, while results already applied stay persisted.
    pub cancellation: CancellationToken,
}

impl RunParams {
    #[must_use]
    pub fn new(organization_id: OrganizationId, execution_id: ExecutionId) -> Self {
        Self {
            organization_id,
            execution_id,
            deployment_id: None,
            included_credits: 0,
            subscription_status: None,
            overage_limit: None,
            concurrency_limit: None,
            monitoring_session_id: None,
            cancellation: CancellationToken::new(),
        }
    }
}

/// Build the `error` record a pre-execution short-circuit returns: every
/// node `pending`, no nodes run (§7: "terminal; no nodes run").
fn short_circuit_record(
    workflow: &Workflow,
    params: &RunParams,
    started_at: chrono::DateTime<Utc>,
    message: String,
) -> WorkflowExecution {
    let node_executions = workflow
        .nodes
        .iter()
        .map(|node| NodeExecution {
            node_id: node.id.clone(),
            status: NodeStatus::Pending,
            outputs: None,
            error: None,
            usage: None,
            skip_reason: None,
            blocked_by: None,
        })
        .collect();

    WorkflowExecution {
        id: params.execution_id,
        workflow_id: workflow.id,
        organization_id: params.organization_id,
        deployment_id: params.deployment_id,
        status: nebula_execution::ExecutionStatus::Error,
        error: Some(message),
        node_executions,
        usage: 0,
        started_at,
        ended_at: Some(Utc::now()),
    }
}

/// Run `workflow` to completion. Returns `Ok` with an `error`-status
/// record for `validation_error` and `credit_exceeded` (§7) — those are
/// ordinary outcomes, not [`EngineError`]s. `Err` is reserved for the
/// credit service or execution store themselves being unreachable.
pub async fn run(
    workflow: Arc<Workflow>,
    params: RunParams,
    registry: &nebula_action::ActionRegistry,
    services: &ServiceBundle,
) -> Result<WorkflowExecution, EngineError> {
    let started_at = Utc::now();

    tracing::info!(
        workflow_id = %workflow.id,
        execution_id = %params.execution_id,
        "starting workflow run"
    );

    // Step 1: validate (C1).
    let errors = validate(&workflow);
    if !errors.is_empty() {
        let message = format!(
            "validation_error: {}",
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );
        tracing::warn!(execution_id = %params.execution_id, %message, "workflow failed validation");
        return Ok(short_circuit_record(&workflow, &params, started_at, message));
    }

    // Step 2: plan (C2).
    let execution_plan = plan(&workflow);
    tracing::debug!(
        execution_id = %params.execution_id,
        levels = execution_plan.levels.len(),
        "execution plan built"
    );

    // Step 3: pre-flight credit check.
    if let Some(credit_service) = &services.credit_service {
        let estimated: i64 = workflow.nodes.iter().map(|n| n.estimated_usage).sum();
        let check = CreditCheck {
            org_id: params.organization_id,
            included: params.included_credits,
            estimated,
            subscription_status: params.subscription_status.clone(),
            overage_limit: params.overage_limit,
        };
        let has_enough = credit_service.has_enough_credits(&check).await.map_err(|err| {
            tracing::error!(execution_id = %params.execution_id, %err, "credit service unreachable");
            EngineError::CreditService(err)
        })?;
        if !has_enough {
            tracing::warn!(execution_id = %params.execution_id, estimated, "pre-flight credit check failed");
            return Ok(short_circuit_record(
                &workflow,
                &params,
                started_at,
                "credit_exceeded".to_string(),
            ));
        }
    }

    // Step 4: initialize empty execution state.
    let mut context = WorkflowExecutionContext::new(
        Arc::clone(&workflow),
        execution_plan,
        params.organization_id,
        params.execution_id,
    );
    context.deployment_id = params.deployment_id;
    context.monitoring_session_id = params.monitoring_session_id.clone();

    let mut state = ExecutionState::new();
    let step_seam = services.step_seam();

    // Step 5: level-by-level, bounded-parallel execution.
    for (level_index, level) in context.plan.levels.clone().into_iter().enumerate() {
        if params.cancellation.is_cancelled() {
            tracing::warn!(
                execution_id = %params.execution_id,
                level_index,
                "run cancelled; remaining levels left pending"
            );
            break;
        }

        tracing::debug!(
            execution_id = %params.execution_id,
            level_index,
            node_count = level.len(),
            "starting level"
        );
        let limit = params.concurrency_limit.unwrap_or(level.len().max(1));

        let results: HashMap<NodeId, nebula_execution::NodeExecutionResult> =
            stream::iter(level.iter().cloned())
                .map(|node_id| {
                    let workflow = &context.workflow;
                    let state = &state;
                    let step_seam = step_seam.clone();
                    let cancellation = params.cancellation.clone();
                    async move {
                        let node = workflow
                            .node(&node_id)
                            .expect("plan only ever names nodes declared in the workflow");
                        let result = execute_node(
                            workflow,
                            registry,
                            services,
                            &step_seam,
                            node,
                            state,
                            context.organization_id,
                            context.execution_id,
                            context.workflow_id,
                            cancellation,
                        )
                        .await;
                        (node_id, result)
                    }
                })
                .buffer_unordered(limit)
                .collect::<Vec<_>>()
                .await
                .into_iter()
                .collect();

        let mut results = results;
        for node_id in &level {
            let result = results
                .remove(node_id)
                .expect("every node dispatched in this level produced a result");
            if let nebula_execution::NodeExecutionResult::Error { message, .. } = &result {
                tracing::warn!(execution_id = %params.execution_id, node_id = %node_id, %message, "node errored");
            }
            state.apply_node_result(node_id.clone(), result);

            let update = snapshot(&context, &state, started_at, None);
            services
                .monitoring_service
                .send_update(params.monitoring_session_id.as_deref(), &update)
                .await;
        }
    }

    // Step 6: terminal status (derived, not stored).
    let status = get_execution_status(&context, &state);
    let top_level_error = (status == nebula_execution::ExecutionStatus::Error)
        .then(|| "one or more nodes failed".to_string());

    // Step 7: record total usage.
    if let Some(credit_service) = &services.credit_service {
        credit_service.record_usage(params.organization_id, state.total_usage()).await.map_err(|err| {
            tracing::error!(execution_id = %params.execution_id, %err, "failed to record usage");
            EngineError::CreditService(err)
        })?;
    }

    let record = snapshot(&context, &state, started_at, top_level_error);

    // Step 8: save to the execution store. Per §7 this failure is not
    // caught — it propagates to the caller rather than being folded into
    // a degraded record.
    let record = if let Some(execution_store) = &services.execution_store {
        execution_store.save(record).await.map_err(|err| {
            tracing::error!(execution_id = %params.execution_id, %err, "failed to save execution record");
            EngineError::ExecutionStoreSave(err)
        })?
    } else {
        record
    };

    tracing::info!(
        execution_id = %params.execution_id,
        status = ?record.status,
        "workflow run finished"
    );

    // Step 9: return the execution record.
    Ok(record)
}
