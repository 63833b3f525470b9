//! Then steps for task workflow BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::{WrapErr, bail, ensure};
use rstest_bdd_macros::then;
use teamboard::{
    statistics::domain::TaskStatistics,
    task::domain::{Task, TaskStatus},
};

fn reload(world: &BoardWorld) -> Result<Task, eyre::Report> {
    let owner = world.owner()?;
    run_async(world.tasks.find_task(world.task_id()?, owner)).wrap_err("reload task")
}

fn report(world: &BoardWorld) -> Result<&TaskStatistics, eyre::Report> {
    world
        .report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no statistics were requested"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let task = reload(world)?;
    ensure!(
        task.status().as_str() == status,
        "expected status {status}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the task is assigned to "{handle}""#)]
fn task_assigned_to(world: &BoardWorld, handle: String) -> Result<(), eyre::Report> {
    let expected = world.user(&handle)?;
    let task = reload(world)?;
    ensure!(task.assignee() == Some(expected), "task is not held by {handle}");
    Ok(())
}

#[then(r#"the request fails with a "{kind}" error"#)]
fn request_fails_with(world: &BoardWorld, kind: String) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) if err.kind().as_str() == kind => Ok(()),
        Some(Err(err)) => bail!("expected {kind} error, got {} ({err})", err.kind()),
        Some(Ok(_)) => bail!("expected {kind} error, but the request succeeded"),
        None => bail!("no request was made"),
    }
}

#[then("the task has a close timestamp")]
fn has_close_timestamp(world: &BoardWorld) -> Result<(), eyre::Report> {
    let task = reload(world)?;
    ensure!(task.closed_at().is_some(), "closed_at is not set");
    Ok(())
}

#[then(r#"the status histogram is "{histogram}""#)]
fn status_histogram(world: &BoardWorld, histogram: String) -> Result<(), eyre::Report> {
    let stats = report(world)?;
    for pair in histogram.split(',').map(str::trim) {
        let Some((name, count)) = pair.split_once(':') else {
            bail!("malformed histogram entry {pair}");
        };
        let status = TaskStatus::try_from(name)?;
        let expected: usize = count.parse()?;
        let actual = stats.status_count(status);
        ensure!(actual == expected, "{name}: expected {expected}, found {actual}");
    }
    Ok(())
}

#[then("{count:usize} tasks are counted as completed")]
fn completed_count(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let stats = report(world)?;
    ensure!(
        stats.completed_tasks_count == count,
        "expected {count} completed tasks, found {}",
        stats.completed_tasks_count
    );
    Ok(())
}
