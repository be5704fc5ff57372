//! User registration against the `PostgreSQL` directory.

use super::helpers::{pool, skip};
use chrono::SubsecRound;
use eyre::{OptionExt, ensure};
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use todolane::persistence::PgPool;
use todolane::user::{
    adapters::postgres::PostgresUserDirectory, domain::UserProfile, ports::UserDirectory,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_update_and_soft_delete(pool: Option<PgPool>) -> eyre::Result<()> {
    let Some(pool) = pool else {
        skip("register_update_and_soft_delete");
        return Ok(());
    };
    let directory = PostgresUserDirectory::new(pool);
    let clock = DefaultClock;

    let created_at = clock.utc().trunc_subsecs(6);
    let user = directory
        .register(&UserProfile::new("Ada", "engineer"), created_at)
        .await?;
    ensure!(user.name() == "Ada" && user.job_position() == "engineer");
    ensure!(user.created_at() == created_at);

    let mut edited = user.clone();
    edited.apply_profile(UserProfile::new("Ada L.", "lead"), &clock);
    directory.update(&edited).await?;
    let fetched = directory
        .find_by_id(user.id())
        .await?
        .ok_or_eyre("registered user should exist")?;
    ensure!(fetched.name() == "Ada L.");

    edited.mark_deleted(&clock);
    directory.update(&edited).await?;
    let listed = directory.list_active().await?;
    ensure!(listed.iter().all(|other| other.id() != user.id()));
    let stored = directory
        .find_by_id(user.id())
        .await?
        .ok_or_eyre("soft-deleted user should still be stored")?;
    ensure!(!stored.is_active());
    Ok(())
}
