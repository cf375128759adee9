use super::*;

/// Expect only the listed battles to be deleted
#[tokio::test]
async fn deletes_listed_battles() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_battle(0, 1)
        .with_mock_battle(2, 3)
        .with_mock_battle(4, 5)
        .build()
        .await?;

    let deleted = BattleRepository::new(&test.db).delete_many(&[1, 3]).await?;
    assert_eq!(deleted, 2);

    let battles = test.battle().battles().await?;
    assert_eq!(battles.len(), 1);
    assert_eq!(battles[0].id, 2);

    Ok(())
}

/// Expect an empty ID list to be a no-op
#[tokio::test]
async fn ignores_empty_ids() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_battle(0, 1)
        .build()
        .await?;

    let deleted = BattleRepository::new(&test.db).delete_many(&[]).await?;

    assert_eq!(deleted, 0);
    assert_eq!(test.battle().battles().await?.len(), 1);

    Ok(())
}
