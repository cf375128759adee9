use super::*;

/// Expect battles intersecting the range, touching ends included, ordered by start
#[tokio::test]
async fn returns_intersecting_battles() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_battle(5_000, 6_000) // 1: inside
        .with_mock_battle(0, 1_000) // 2: ends on range start
        .with_mock_battle(9_000, 12_000) // 3: starts inside
        .with_mock_battle(12_001, 13_000) // 4: after range
        .with_mock_battle(0, 999) // 5: before range
        .build()
        .await?;

    let battles = BattleRepository::new(&test.db)
        .get_battles_within_range(1_000, 12_000)
        .await?;
    let ids: Vec<i32> = battles.iter().map(|battle| battle.id).collect();

    assert_eq!(ids, vec![2, 1, 3]);

    Ok(())
}

/// Expect a battle spanning the whole range to be returned
#[tokio::test]
async fn returns_battle_enclosing_range() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_battle(0, 100_000)
        .build()
        .await?;

    let battles = BattleRepository::new(&test.db)
        .get_battles_within_range(40_000, 50_000)
        .await?;

    assert_eq!(battles.len(), 1);

    Ok(())
}
