//! In-memory integration tests for project statistics.

use super::helpers::workspace;
use eyre::ensure;
use rstest::rstest;
use teamboard::{
    config::EngineConfig,
    task::{
        domain::{TaskFlag, TaskStatus},
        services::CreateTaskRequest,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_covers_a_working_project() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;
    ws.projects
        .assign_members(ws.project_id, ws.admin, &[ws.member, ws.colleague])
        .await?;

    let first = ws
        .tasks
        .create_task(
            ws.admin,
            CreateTaskRequest::new(ws.project_id, "Write docs").with_flag("low"),
        )
        .await?;
    let second = ws
        .tasks
        .create_task(
            ws.admin,
            CreateTaskRequest::new(ws.project_id, "Fix bug").with_flag("priority"),
        )
        .await?;
    ws.tasks
        .create_task(ws.owner, CreateTaskRequest::new(ws.project_id, "Plan Q3"))
        .await?;

    ws.tasks.take(first.id(), ws.member).await?;
    ws.tasks.update_status(first.id(), ws.member, "pending").await?;
    ws.tasks.update_status(first.id(), ws.admin, "completed").await?;
    ws.tasks.assign(second.id(), ws.admin, ws.member).await?;

    let stats = ws
        .statistics
        .project_statistics(ws.project_id, ws.colleague)
        .await?;

    ensure!(stats.total_tasks == 3);
    ensure!(stats.status_count(TaskStatus::Completed) == 1);
    ensure!(stats.status_count(TaskStatus::Assigned) == 1);
    ensure!(stats.status_count(TaskStatus::Created) == 1);
    ensure!(stats.flag_count(TaskFlag::Priority) == 1);
    ensure!(stats.flag_count(TaskFlag::Low) == 1);
    ensure!(stats.flag_count(TaskFlag::None) == 1);
    ensure!(stats.completed_tasks_count == 1);
    ensure!(stats.average_completion_days == 0);

    let today = stats
        .completion_series
        .last()
        .ok_or_else(|| eyre::eyre!("empty series"))?;
    ensure!((today.created, today.completed) == (3, 1));
    let changes: usize = stats.activity_series.iter().map(|day| day.changes).sum();
    ensure!(changes == 7, "counted {changes} log entries");

    let rollup: Vec<(&str, usize, usize)> = stats
        .member_stats
        .iter()
        .map(|entry| (entry.member.display_name.as_str(), entry.total_tasks, entry.completed_tasks))
        .collect();
    ensure!(rollup == [("Mia", 2, 1)], "rollup was {rollup:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_serializes_for_transport() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default().with_statistics_window_days(3)).await?;
    ws.tasks
        .create_task(ws.admin, CreateTaskRequest::new(ws.project_id, "Only task"))
        .await?;

    let stats = ws
        .statistics
        .project_statistics(ws.project_id, ws.member)
        .await?;
    let json = serde_json::to_value(&stats)?;

    ensure!(json["total_tasks"] == 1);
    ensure!(json["status_counts"]["created"] == 1);
    ensure!(json["status_counts"]["in_review"] == 0);
    ensure!(json["flag_counts"]["none"] == 1);
    ensure!(json["completion_series"].as_array().map(Vec::len) == Some(3));
    ensure!(json["member_stats"].as_array().is_some_and(Vec::is_empty));
    Ok(())
}
