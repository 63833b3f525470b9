//! In-memory integration tests for the task lifecycle.

use super::helpers::{Workspace, workspace};
use eyre::ensure;
use rstest::rstest;
use teamboard::{
    config::EngineConfig,
    error::ErrorKind,
    task::{
        domain::{LogAction, Task, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError},
        services::{CreateTaskRequest, TaskServiceError},
    },
    user::domain::UserId,
};

async fn assigned_task(ws: &Workspace, assignee: UserId) -> eyre::Result<Task> {
    Ok(ws
        .tasks
        .create_task(
            ws.admin,
            CreateTaskRequest::new(ws.project_id, "Cut the release branch")
                .with_assignee(assignee)
                .with_flag("medium"),
        )
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_loop_records_every_step() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;
    let task = assigned_task(&ws, ws.member).await?;
    let id = task.id();

    ws.tasks.update_status(id, ws.member, "pending").await?;
    ws.tasks.update_status(id, ws.member, "in_review").await?;
    ws.tasks.update_status(id, ws.admin, "pending").await?;
    ws.tasks.update_status(id, ws.member, "in_review").await?;
    let completed = ws.tasks.update_status(id, ws.owner, "completed").await?;
    ensure!(completed.closed_at().is_some());
    let closed = ws.tasks.update_status(id, ws.admin, "closed").await?;
    let reopened = ws.tasks.update_status(id, ws.admin, "completed").await?;

    ensure!(reopened.status() == TaskStatus::Completed);
    ensure!(reopened.closed_at() >= closed.closed_at());
    let actions: Vec<LogAction> = reopened.logs().iter().map(|entry| entry.action()).collect();
    ensure!(
        actions
            == [
                LogAction::Created,
                LogAction::Assigned,
                LogAction::Pending,
                LogAction::InReview,
                LogAction::Pending,
                LogAction::InReview,
                LogAction::Completed,
                LogAction::Closed,
                LogAction::Completed,
            ],
        "actions were {actions:?}"
    );
    ensure!(reopened.version() == task.version() + 7);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_pulls_completed_work_back() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;
    let task = assigned_task(&ws, ws.member).await?;

    ws.tasks.toggle_status(task.id(), ws.member).await?;
    let reassigned = ws.tasks.assign(task.id(), ws.admin, ws.colleague).await?;

    ensure!(reassigned.status() == TaskStatus::Assigned);
    ensure!(reassigned.closed_at().is_none());

    let rejected = ws.tasks.update_status(task.id(), ws.member, "pending").await;
    ensure!(matches!(rejected, Err(ref err) if err.kind() == ErrorKind::Forbidden));
    let started = ws.tasks.update_status(task.id(), ws.colleague, "pending").await?;
    ensure!(started.status() == TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_copies_are_rejected_by_the_repository() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;
    let task = assigned_task(&ws, ws.member).await?;
    let mut stale = task.clone();

    ws.tasks.update_flag(task.id(), ws.admin, "high").await?;
    stale.unassign(ws.admin, &mockable::DefaultClock);
    let result = ws.task_repo.update(&stale).await;

    ensure!(matches!(result, Err(TaskRepositoryError::VersionConflict { .. })), "got {result:?}");
    ensure!(result.is_err_and(|err| {
        let kind = err.kind();
        kind == ErrorKind::Conflict && kind.is_retryable()
    }));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_config_accepts_outside_assignees() -> eyre::Result<()> {
    let strict = workspace(EngineConfig::default()).await?;
    let rejected = assigned_task(&strict, strict.outsider).await;
    let kind = rejected
        .err()
        .and_then(|err| err.downcast_ref::<TaskServiceError>().map(TaskServiceError::kind));
    ensure!(kind == Some(ErrorKind::BadRequest));

    let legacy = workspace(EngineConfig::legacy()).await?;
    let accepted = assigned_task(&legacy, legacy.outsider).await?;
    ensure!(accepted.assignee() == Some(legacy.outsider));

    let denied = legacy
        .tasks
        .update_status(accepted.id(), legacy.outsider, "pending")
        .await;
    ensure!(matches!(denied, Err(ref err) if err.kind() == ErrorKind::Forbidden));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_serialize_with_snake_case_enums() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;
    let task = assigned_task(&ws, ws.member).await?;
    let reviewed = ws.tasks.update_status(task.id(), ws.admin, "in_review").await?;

    let json = serde_json::to_value(&reviewed)?;

    ensure!(json["status"] == "in_review");
    ensure!(json["flag"] == "medium");
    ensure!(json["logs"][2]["action"] == "in_review");
    ensure!(json["logs"][2]["details"] == "Status changed from assigned to in_review");
    Ok(())
}
