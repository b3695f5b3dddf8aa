//! Workflow executor (C8): drives the planner, resolves per-node inputs,
//! fans out each wave, and propagates skips (§4.8).

use std::collections::{HashMap, HashSet};

use tokio::task::JoinSet;

use nebula_action::NodeExecutionResult;
use nebula_execution::{execute_node, plan_waves};
use nebula_expression::ExecutionContext;

use crate::config::WorkflowExecutionConfig;
use crate::status::NodeStatus;
use crate::workflow::Workflow;
use crate::WorkflowExecutionResult;

/// Execute `workflow` against `ctx` under `cfg`.
///
/// Implements the full control flow of spec §4.8: the planner's waves run
/// strictly in sequence; within a wave every non-skipped node is launched
/// concurrently via a [`JoinSet`] and the wave only completes once every
/// task in it has settled. Node output is written back into `ctx`
/// (`store_node_output`) and conditional branches/failures mark their
/// descendants skipped — all from this single-threaded completion loop, so
/// no lock is needed on `ctx`'s "normal" write path (§5, Design Note
/// "Concurrency of the context", option (a)).
pub async fn execute_workflow(
    workflow: &Workflow,
    ctx: &ExecutionContext,
    cfg: &WorkflowExecutionConfig,
) -> WorkflowExecutionResult {
    let node_ids = workflow.node_ids();
    let edge_pairs = workflow.edge_pairs();

    let waves = match plan_waves(&node_ids, &edge_pairs) {
        Ok(waves) => waves,
        Err(err) => {
            tracing::warn!(error = %err, "workflow rejected: cycle detected");
            return WorkflowExecutionResult {
                success: false,
                results: HashMap::new(),
                statuses: HashMap::new(),
                error: Some(err.to_string()),
            };
        }
    };

    let children = build_children_map(&workflow.edges);
    let workflow_execution_id = nebula_core::ExecutionId::v4().to_string();

    let mut statuses: HashMap<String, NodeStatus> =
        node_ids.iter().map(|id| (id.clone(), NodeStatus::Idle)).collect();
    let mut results: HashMap<String, NodeExecutionResult> = HashMap::new();
    let mut skipped: HashSet<String> = HashSet::new();

    for wave in waves {
        let mut join_set = JoinSet::new();
        let mut task_node_ids: HashMap<tokio::task::Id, String> = HashMap::new();

        for node_id in &wave {
            if skipped.contains(node_id) {
                statuses.insert(node_id.clone(), NodeStatus::Skipped);
                continue;
            }
            if cfg.base.signal.as_ref().is_some_and(tokio_util::sync::CancellationToken::is_cancelled) {
                statuses.insert(node_id.clone(), NodeStatus::Skipped);
                continue;
            }

            let Some(workflow_node) = workflow.node(node_id) else {
                // Planner only ever emits IDs drawn from `workflow.nodes`.
                continue;
            };

            statuses.insert(node_id.clone(), NodeStatus::Running);
            if let Some(on_start) = &cfg.on_node_start {
                on_start(node_id, &workflow_node.node_type);
            }

            let resolved_input = ctx.interpolate_object(&workflow_node.input);
            let mut node_ctx = ctx.to_node_context(cfg.user_id.clone(), workflow_execution_id.clone());
            if let Some(campaign_id) = &cfg.campaign_id {
                node_ctx = node_ctx.with_campaign_id(campaign_id.clone());
            }
            let per_type_cfg = cfg.resolve_node_config(&workflow_node.node_type);
            let def = workflow_node.node.clone();
            let id = node_id.clone();

            let abort_handle = join_set.spawn(async move {
                let outcome = execute_node(&def, resolved_input, &node_ctx, &per_type_cfg).await;
                (id, outcome)
            });
            task_node_ids.insert(abort_handle.id(), node_id.clone());
        }

        while let Some(joined) = join_set.join_next_with_id().await {
            let (node_id, outcome) = match joined {
                Ok((_, (node_id, outcome))) => (node_id, Some(outcome)),
                Err(join_err) => {
                    // A node task panicked; treat it as an executor exception
                    // rather than letting one node's bug take down the run.
                    tracing::error!(error = %join_err, "node task panicked");
                    let Some(node_id) = task_node_ids.get(&join_err.id()).cloned() else {
                        continue;
                    };
                    (node_id, None)
                }
            };

            let Some(outcome) = outcome else {
                statuses.insert(node_id.clone(), NodeStatus::Error);
                let message = "node task panicked";
                if let Some(on_error) = &cfg.on_node_error {
                    let err = nebula_error::NebulaError::executor_failure(message);
                    on_error(&node_id, &err);
                }
                if cfg.stop_on_error {
                    mark_downstream_skipped(&node_id, &children, &mut skipped);
                }
                results.insert(node_id, NodeExecutionResult::failure(message));
                continue;
            };

            match outcome {
                Ok(result) if result.success => {
                    statuses.insert(node_id.clone(), NodeStatus::Success);
                    if let Some(on_complete) = &cfg.on_node_complete {
                        on_complete(&node_id, &result);
                    }
                    if let Some(output) = &result.output {
                        ctx.store_node_output(&node_id, output.clone());
                    }
                    apply_conditional_branching(workflow, &node_id, &result, &children, &mut skipped);
                    results.insert(node_id, result);
                }
                Ok(result) => {
                    statuses.insert(node_id.clone(), NodeStatus::Error);
                    if let Some(on_error) = &cfg.on_node_error {
                        let err = nebula_error::NebulaError::executor_failure(
                            result.error.clone().unwrap_or_default(),
                        );
                        on_error(&node_id, &err);
                    }
                    if cfg.stop_on_error {
                        mark_downstream_skipped(&node_id, &children, &mut skipped);
                    }
                    results.insert(node_id, result);
                }
                Err(validation_err) => {
                    statuses.insert(node_id.clone(), NodeStatus::Error);
                    if let Some(on_error) = &cfg.on_node_error {
                        on_error(&node_id, &validation_err);
                    }
                    if cfg.stop_on_error {
                        mark_downstream_skipped(&node_id, &children, &mut skipped);
                    }
                    results.insert(node_id, NodeExecutionResult::failure(validation_err.to_string()));
                }
            }
        }
    }

    let success = statuses
        .values()
        .all(|status| matches!(status, NodeStatus::Success | NodeStatus::Skipped));

    WorkflowExecutionResult {
        success,
        results,
        statuses,
        error: None,
    }
}

/// Build the "children of X" reverse lookup (really just forward adjacency:
/// for each node, the nodes its outgoing edges point to) used by skip
/// propagation (§4.8.2).
fn build_children_map(edges: &[crate::workflow::Edge]) -> HashMap<String, Vec<String>> {
    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for edge in edges {
        children.entry(edge.from.clone()).or_default().push(edge.to.clone());
    }
    children
}

/// §4.8.1: for every edge out of `node_id` carrying a `condition` that does
/// not match the node's returned `next_node_id`, mark the edge's target (and
/// everything transitively downstream of it) skipped. Edges without a
/// condition are always followed and never participate here.
fn apply_conditional_branching(
    workflow: &Workflow,
    node_id: &str,
    result: &NodeExecutionResult,
    children: &HashMap<String, Vec<String>>,
    skipped: &mut HashSet<String>,
) {
    let Some(next_node_id) = &result.next_node_id else {
        return;
    };
    for edge in workflow.edges.iter().filter(|e| e.from == node_id) {
        if let Some(condition) = &edge.condition {
            if condition != next_node_id && skipped.insert(edge.to.clone()) {
                mark_downstream_skipped(&edge.to, children, skipped);
            }
        }
    }
}

/// §4.8.2 `markDownstreamSkipped`: mark every descendant of `id` (not `id`
/// itself) as skipped, recursively, idempotently.
fn mark_downstream_skipped(id: &str, children: &HashMap<String, Vec<String>>, skipped: &mut HashSet<String>) {
    let Some(kids) = children.get(id) else {
        return;
    };
    for kid in kids {
        if skipped.insert(kid.clone()) {
            mark_downstream_skipped(kid, children, skipped);
        }
    }
}
