//! Given steps for team ownership BDD scenarios.

use super::world::{TeamWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a team "{name}" owned by "{owner}""#)]
fn team_owned_by(world: &mut TeamWorld, name: String, owner: String) -> Result<(), eyre::Report> {
    let owner_id = world.user(&owner)?;
    let team = run_async(world.service.create_team(owner_id, name)).wrap_err("create team")?;
    world.team_id = Some(team.id());
    world.founder = Some(owner_id);
    Ok(())
}

#[given(r#""{handle}" is a member of the team"#)]
fn member_of_team(world: &mut TeamWorld, handle: String) -> Result<(), eyre::Report> {
    world.user(&handle)?;
    let (team_id, founder) = world.team()?;
    run_async(world.service.add_member_by_handle(team_id, founder, &handle))
        .wrap_err("add member by handle")?;
    Ok(())
}

#[given(r#""{handle}" holds the "{role}" role"#)]
fn holds_role(world: &mut TeamWorld, handle: String, role: String) -> Result<(), eyre::Report> {
    let target = world.user(&handle)?;
    let (team_id, founder) = world.team()?;
    run_async(world.service.change_role(team_id, founder, target, &role))
        .wrap_err("change role in scenario setup")?;
    Ok(())
}
