//! Unit tests for profile resolution.

use crate::{
    config::EngineConfig,
    user::{
        adapters::memory::InMemoryUserDirectory,
        domain::{UserId, UserProfile, UserSummary},
        ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
        services::ProfileResolver,
    },
};
use async_trait::async_trait;
use eyre::ensure;
use mockall::{mock, predicate::eq};
use rstest::{fixture, rstest};
use std::sync::Arc;

mock! {
    pub Directory {}

    #[async_trait]
    impl UserDirectory for Directory {
        async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>>;
        async fn find_by_handle(&self, handle: &str) -> UserDirectoryResult<Option<UserProfile>>;
    }
}

#[fixture]
fn grace() -> UserProfile {
    UserProfile::new(UserId::new(), " grace ", "Grace Hopper", " Grace@Navy.MIL ")
}

#[rstest]
fn profile_normalizes_handle_and_email(grace: UserProfile) {
    assert_eq!(grace.handle(), "grace");
    assert_eq!(grace.email(), "grace@navy.mil");
    assert_eq!(grace.avatar(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_resolves_ids_and_trimmed_handles(grace: UserProfile) -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    directory.register(grace.clone())?;

    ensure!(directory.find_by_id(grace.id()).await?.as_ref() == Some(&grace));
    ensure!(directory.find_by_handle("  grace").await?.as_ref() == Some(&grace));
    ensure!(directory.find_by_handle("hopper").await?.is_none());
    Ok(())
}

#[rstest]
fn directory_rejects_duplicate_handles(grace: UserProfile) -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    directory.register(grace)?;

    let duplicate = UserProfile::new(UserId::new(), "grace", "Another Grace", "g2@example.com");
    let result = directory.register(duplicate);

    ensure!(matches!(result, Err(UserDirectoryError::DuplicateUser(ref handle)) if handle == "grace"));
    Ok(())
}

#[rstest]
fn directory_rejects_duplicate_emails(grace: UserProfile) -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    directory.register(grace)?;

    let duplicate = UserProfile::new(UserId::new(), "amazing", "Amazing Grace", "GRACE@navy.mil");
    let result = directory.register(duplicate);

    ensure!(
        matches!(result, Err(UserDirectoryError::DuplicateUser(ref email)) if email == "grace@navy.mil")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summarize_copies_resolved_profile(grace: UserProfile) -> eyre::Result<()> {
    let profile = grace.with_avatar("grace.png");
    let id = profile.id();
    let mut directory = MockDirectory::new();
    let found = profile.clone();
    directory
        .expect_find_by_id()
        .with(eq(id))
        .times(1)
        .returning(move |_| Ok(Some(found.clone())));
    let resolver = ProfileResolver::new(Arc::new(directory), &EngineConfig::default());

    let summary = resolver.summarize(id).await;

    ensure!(summary == UserSummary::from_profile(&profile));
    ensure!(summary.resolved);
    ensure!(summary.avatar.as_deref() == Some("grace.png"));
    Ok(())
}

#[rstest]
#[case::missing(false)]
#[case::backend_failure(true)]
#[tokio::test(flavor = "multi_thread")]
async fn summarize_falls_back_to_configured_placeholder(#[case] fail: bool) -> eyre::Result<()> {
    let mut directory = MockDirectory::new();
    directory.expect_find_by_id().returning(move |_| {
        if fail {
            Err(UserDirectoryError::persistence(std::io::Error::other(
                "connection reset",
            )))
        } else {
            Ok(None)
        }
    });
    let config = EngineConfig {
        unknown_user_name: "Former colleague".to_owned(),
        unknown_user_email: "gone@example.com".to_owned(),
        ..EngineConfig::default()
    };
    let resolver = ProfileResolver::new(Arc::new(directory), &config);
    let id = UserId::new();

    let summary = resolver.summarize(id).await;

    ensure!(summary == UserSummary::placeholder(id, "Former colleague", "gone@example.com"));
    ensure!(!summary.resolved);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summarize_all_preserves_order(grace: UserProfile) -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    directory.register(grace.clone())?;
    let resolver = ProfileResolver::new(Arc::new(directory), &EngineConfig::default());
    let stranger = UserId::new();

    let summaries = resolver.summarize_all(&[stranger, grace.id()]).await;

    let ids: Vec<UserId> = summaries.iter().map(|summary| summary.user_id).collect();
    ensure!(ids == [stranger, grace.id()]);
    ensure!(summaries.iter().map(|summary| summary.resolved).eq([false, true]));
    Ok(())
}
