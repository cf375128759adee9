use super::*;

async fn setup(count: i64) -> Result<TestContext, TestError> {
    let mut builder = TestBuilder::new().with_battle_tables();
    for index in 0..count {
        builder = builder.with_mock_battle(index * 1_000, index * 1_000 + 500);
    }
    builder.build().await
}

/// Expect 30 battles when no limit is provided
#[tokio::test]
async fn defaults_limit() -> Result<(), TestError> {
    let test = setup(40).await?;

    let battles = BattleService::new(&test.db, ClusteringConfig::default())
        .list_battles(BattleFilter::default())
        .await
        .expect("listing should succeed");

    assert_eq!(battles.len(), 30);

    Ok(())
}

/// Expect the limit to be clamped to 100
#[tokio::test]
async fn clamps_large_limit() -> Result<(), TestError> {
    let test = setup(120).await?;

    let battles = BattleService::new(&test.db, ClusteringConfig::default())
        .list_battles(BattleFilter {
            limit: Some(1_000),
            ..Default::default()
        })
        .await
        .expect("listing should succeed");

    assert_eq!(battles.len(), 100);

    Ok(())
}

/// Expect a zero or negative limit to return a single battle
#[tokio::test]
async fn clamps_small_limit() -> Result<(), TestError> {
    let test = setup(5).await?;
    let service = BattleService::new(&test.db, ClusteringConfig::default());

    for limit in [0, -3] {
        let battles = service
            .list_battles(BattleFilter {
                limit: Some(limit),
                ..Default::default()
            })
            .await
            .expect("listing should succeed");

        assert_eq!(battles.len(), 1);
    }

    Ok(())
}

/// Expect a negative offset to behave like no offset
#[tokio::test]
async fn clamps_negative_offset() -> Result<(), TestError> {
    let test = setup(3).await?;

    let battles = BattleService::new(&test.db, ClusteringConfig::default())
        .list_battles(BattleFilter {
            order_by: vec![(BattleColumn::Id, SortOrder::Asc)],
            offset: Some(-10),
            ..Default::default()
        })
        .await
        .expect("listing should succeed");

    let ids: Vec<i32> = battles.iter().map(|battle| battle.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    Ok(())
}

/// Expect the most recent battles first when ordered by end descending
#[tokio::test]
async fn orders_most_recent_first() -> Result<(), TestError> {
    let test = setup(3).await?;

    let battles = BattleService::new(&test.db, ClusteringConfig::default())
        .list_battles(BattleFilter {
            order_by: vec![(BattleColumn::End, SortOrder::Desc)],
            limit: Some(2),
            ..Default::default()
        })
        .await
        .expect("listing should succeed");

    let ids: Vec<i32> = battles.iter().map(|battle| battle.id).collect();
    assert_eq!(ids, vec![3, 2]);

    Ok(())
}
