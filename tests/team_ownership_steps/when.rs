//! When steps for team ownership BDD scenarios.

use super::world::{TeamWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{actor}" removes "{target}" from the team"#)]
fn removes_member(world: &mut TeamWorld, actor: String, target: String) -> Result<(), eyre::Report> {
    let actor_id = world.user(&actor)?;
    let target_id = world.user(&target)?;
    let (team_id, _) = world.team()?;
    let result = run_async(world.service.remove_member(team_id, actor_id, target_id));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#""{actor}" changes the role of "{target}" to "{role}""#)]
fn changes_role(
    world: &mut TeamWorld,
    actor: String,
    target: String,
    role: String,
) -> Result<(), eyre::Report> {
    let actor_id = world.user(&actor)?;
    let target_id = world.user(&target)?;
    let (team_id, _) = world.team()?;
    let result = run_async(world.service.change_role(team_id, actor_id, target_id, &role));
    world.last_result = Some(result);
    Ok(())
}
