use super::*;

/// Expect None when there are no killmails
#[tokio::test]
async fn returns_none_for_empty_table() -> Result<(), TestError> {
    let test = TestBuilder::new().with_battle_tables().build().await?;

    let result = BattleRepository::new(&test.db)
        .get_earliest_unclustered_timestamp()
        .await?;

    assert_eq!(result, None);

    Ok(())
}

/// Expect None when every killmail is already associated with a battle
#[tokio::test]
async fn returns_none_when_all_clustered() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 1_000)
        .with_mock_battle(1_000, 1_000)
        .with_association(1, 1)
        .build()
        .await?;

    let result = BattleRepository::new(&test.db)
        .get_earliest_unclustered_timestamp()
        .await?;

    assert_eq!(result, None);

    Ok(())
}

/// Expect the timestamp of the earliest killmail without a battle, skipping clustered ones
#[tokio::test]
async fn skips_clustered_killmails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 1_000)
        .with_mock_killmail(2, 5_000)
        .with_mock_killmail(3, 3_000)
        .with_mock_battle(1_000, 1_000)
        .with_association(1, 1)
        .build()
        .await?;

    let result = BattleRepository::new(&test.db)
        .get_earliest_unclustered_timestamp()
        .await?;

    assert_eq!(result, Some(3_000));

    Ok(())
}
