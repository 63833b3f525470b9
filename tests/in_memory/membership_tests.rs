//! In-memory integration tests for team membership management.

use super::helpers::workspace;
use eyre::ensure;
use rstest::rstest;
use teamboard::{
    config::EngineConfig,
    error::ErrorKind,
    team::{
        domain::{Role, TeamDomainError},
        services::{TeamFilter, TeamServiceError},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ownership_can_be_handed_over() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;

    let blocked = ws.teams.remove_member(ws.team_id, ws.owner, ws.owner).await;
    ensure!(matches!(
        blocked,
        Err(TeamServiceError::Domain(TeamDomainError::LastOwnerRemoval))
    ));

    ws.teams
        .change_role(ws.team_id, ws.owner, ws.admin, "owner")
        .await?;
    let team = ws.teams.remove_member(ws.team_id, ws.owner, ws.owner).await?;

    ensure!(team.role_of(ws.admin) == Some(Role::Owner));
    ensure!(team.owner_count() == 1);
    let demotion = ws
        .teams
        .change_role(ws.team_id, ws.admin, ws.admin, "member")
        .await;
    ensure!(matches!(demotion, Err(ref err) if err.kind() == ErrorKind::Conflict));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_and_admins_may_leave() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;

    let other = ws
        .teams
        .remove_member(ws.team_id, ws.member, ws.colleague)
        .await;
    ensure!(matches!(other, Err(ref err) if err.kind() == ErrorKind::Forbidden));

    ws.teams.remove_member(ws.team_id, ws.member, ws.member).await?;
    let team = ws.teams.remove_member(ws.team_id, ws.admin, ws.admin).await?;

    ensure!(!team.is_member(ws.member));
    ensure!(!team.is_member(ws.admin));
    ensure!(team.members().len() == 2);

    let after = ws.teams.teams_for_user(ws.member, TeamFilter::All).await?;
    ensure!(after.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admins_manage_members_but_not_peers() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;

    ws.teams
        .change_role(ws.team_id, ws.admin, ws.member, "admin")
        .await?;
    let peer = ws
        .teams
        .change_role(ws.team_id, ws.admin, ws.member, "member")
        .await;
    let promote = ws
        .teams
        .change_role(ws.team_id, ws.admin, ws.colleague, "owner")
        .await;
    let remove_owner = ws
        .teams
        .remove_member(ws.team_id, ws.admin, ws.owner)
        .await;

    for result in [peer, promote, remove_owner] {
        ensure!(matches!(result, Err(ref err) if err.kind() == ErrorKind::Forbidden), "got {result:?}");
    }
    let team = ws
        .teams
        .remove_member(ws.team_id, ws.admin, ws.colleague)
        .await?;
    ensure!(!team.is_member(ws.colleague));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn roster_reflects_roles_and_profiles() -> eyre::Result<()> {
    let ws = workspace(EngineConfig::default()).await?;

    let roster = ws.teams.roster(ws.team_id, ws.colleague).await?;

    let rows: Vec<(&str, Role)> = roster
        .iter()
        .map(|entry| (entry.profile.display_name.as_str(), entry.membership.role()))
        .collect();
    ensure!(
        rows == [
            ("Olivia", Role::Owner),
            ("Adam", Role::Admin),
            ("Mia", Role::Member),
            ("Max", Role::Member),
        ],
        "roster was {rows:?}"
    );
    ensure!(roster.iter().all(|entry| entry.profile.resolved));
    Ok(())
}
