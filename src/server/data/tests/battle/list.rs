use crate::server::model::battle::{
    BattleBound, BattleColumn, BattleFilter, BoundCmp, SortOrder,
};

use super::*;

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_battle_tables()
        .with_mock_battle(3_000, 4_000)
        .with_mock_battle(1_000, 2_000)
        .with_mock_battle(5_000, 9_000)
        .build()
        .await
}

/// Expect battles ordered by the requested columns
#[tokio::test]
async fn orders_by_column() -> Result<(), TestError> {
    let test = setup().await?;

    let battles = BattleRepository::new(&test.db)
        .list(&BattleFilter {
            order_by: vec![(BattleColumn::Start, SortOrder::Desc)],
            ..Default::default()
        })
        .await?;
    let ids: Vec<i32> = battles.iter().map(|battle| battle.id).collect();

    assert_eq!(ids, vec![3, 1, 2]);

    Ok(())
}

/// Expect only the battle with the requested ID
#[tokio::test]
async fn filters_by_id() -> Result<(), TestError> {
    let test = setup().await?;

    let battles = BattleRepository::new(&test.db)
        .list(&BattleFilter {
            id: Some(2),
            ..Default::default()
        })
        .await?;

    assert_eq!(battles.len(), 1);
    assert_eq!(battles[0].start, 1_000);

    Ok(())
}

/// Expect only battles satisfying the bound
#[tokio::test]
async fn filters_by_bound() -> Result<(), TestError> {
    let test = setup().await?;

    let battles = BattleRepository::new(&test.db)
        .list(&BattleFilter {
            order_by: vec![(BattleColumn::Id, SortOrder::Asc)],
            bound: Some(BattleBound {
                column: BattleColumn::End,
                cmp: BoundCmp::Gte,
                value: 4_000,
            }),
            ..Default::default()
        })
        .await?;
    let ids: Vec<i32> = battles.iter().map(|battle| battle.id).collect();

    assert_eq!(ids, vec![1, 3]);

    Ok(())
}

/// Expect limit & offset to page through the ordered battles
#[tokio::test]
async fn applies_limit_and_offset() -> Result<(), TestError> {
    let test = setup().await?;

    let battles = BattleRepository::new(&test.db)
        .list(&BattleFilter {
            order_by: vec![(BattleColumn::Start, SortOrder::Asc)],
            limit: Some(1),
            offset: Some(1),
            ..Default::default()
        })
        .await?;

    assert_eq!(battles.len(), 1);
    assert_eq!(battles[0].id, 1);

    Ok(())
}
