use super::*;

/// Expect killmails of every source battle to move onto the target battle
#[tokio::test]
async fn moves_killmails_to_target() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 0)
        .with_mock_killmail(2, 10)
        .with_mock_killmail(3, 20)
        .with_mock_killmail(4, 30)
        .with_mock_battle(0, 0)
        .with_mock_battle(10, 10)
        .with_mock_battle(20, 20)
        .with_mock_battle(30, 30)
        .with_association(1, 1)
        .with_association(2, 2)
        .with_association(3, 3)
        .with_association(4, 4)
        .build()
        .await?;

    let moved = BattleRepository::new(&test.db)
        .reassign_killmails(&[2, 3], 1)
        .await?;
    assert_eq!(moved, 2);

    assert_eq!(test.battle().killmails_of(1).await?, vec![1, 2, 3]);
    assert_eq!(test.battle().killmails_of(4).await?, vec![4]);

    Ok(())
}
