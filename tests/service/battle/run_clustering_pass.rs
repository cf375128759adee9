use super::*;

const TWENTY_MINUTES: i64 = 20 * 60 * 1000;

/// Expect a zero summary and no battles when there is nothing to cluster
#[tokio::test]
async fn returns_zero_summary_for_empty_backlog() -> Result<(), TestError> {
    let test = TestBuilder::new().with_battle_tables().build().await?;

    let summary = BattleService::new(&test.db, ClusteringConfig::default())
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    assert_eq!(summary, ClusteringSummary::default());
    assert!(test.battle().battles().await?.is_empty());

    Ok(())
}

/// Expect killmails 0, 5, 25 & 26 minutes apart to form one battle with a 20 minute window
#[tokio::test]
async fn clusters_chain_into_one_battle() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 0)
        .with_mock_killmail(2, 300_000)
        .with_mock_killmail(3, 1_500_000)
        .with_mock_killmail(4, 1_560_000)
        .build()
        .await?;

    let summary = BattleService::new(&test.db, config(TWENTY_MINUTES))
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    assert_eq!(summary.new_battle_count, 1);
    assert_eq!(summary.clustered_killmail_count, 4);

    let battles = test.battle().battles().await?;
    assert_eq!(battles.len(), 1);
    assert_eq!((battles[0].start, battles[0].end), (0, 1_560_000));
    assert_eq!(test.battle().killmails_of(battles[0].id).await?, vec![1, 2, 3, 4]);

    Ok(())
}

/// Expect a gap of exactly the window to join and one millisecond more to split
#[tokio::test]
async fn applies_inclusive_gap_rule() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 0)
        .with_mock_killmail(2, TWENTY_MINUTES)
        .with_mock_killmail(3, 2 * TWENTY_MINUTES + 1)
        .build()
        .await?;

    let summary = BattleService::new(&test.db, config(TWENTY_MINUTES))
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    assert_eq!(summary.new_battle_count, 2);

    let battles = test.battle().battles().await?;
    assert_eq!(test.battle().killmails_of(battles[0].id).await?, vec![1, 2]);
    assert_eq!(test.battle().killmails_of(battles[1].id).await?, vec![3]);

    Ok(())
}

/// Expect every killmail associated exactly once and every battle range to enclose its members
#[tokio::test]
async fn covers_every_killmail_once() -> Result<(), TestError> {
    let timestamps: [i64; 10] = [0, 50, 90, 400, 410, 1_000, 1_099, 1_198, 5_000, 5_100];
    let mut builder = TestBuilder::new().with_battle_tables();
    for (index, timestamp) in timestamps.iter().enumerate() {
        builder = builder.with_mock_killmail(index as i64 + 1, *timestamp);
    }
    let test = builder.build().await?;

    let summary = BattleService::new(&test.db, config(100))
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    assert_eq!(summary.clustered_killmail_count, timestamps.len());
    assert_eq!(summary.new_battle_count, 4);

    let associations = test.battle().associations().await?;
    assert_eq!(associations.len(), timestamps.len());

    for battle in test.battle().battles().await? {
        assert!(battle.start <= battle.end);

        let members = test.battle().killmails_of(battle.id).await?;
        let member_times: Vec<i64> = members
            .iter()
            .map(|id| timestamps[(*id - 1) as usize])
            .collect();
        assert_eq!(member_times.iter().min(), Some(&battle.start));
        assert_eq!(member_times.iter().max(), Some(&battle.end));
    }

    Ok(())
}

/// Expect a second pass without new killmails to change nothing
#[tokio::test]
async fn second_pass_is_noop() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 0)
        .with_mock_killmail(2, 60_000)
        .with_mock_killmail(3, 10_000_000)
        .build()
        .await?;

    let service = BattleService::new(&test.db, config(TWENTY_MINUTES));
    service
        .run_clustering_pass()
        .await
        .expect("first pass should succeed");

    let battles = test.battle().battles().await?;
    let associations = test.battle().associations().await?;

    let summary = service
        .run_clustering_pass()
        .await
        .expect("second pass should succeed");

    assert_eq!(summary, ClusteringSummary::default());
    assert_eq!(test.battle().battles().await?, battles);
    assert_eq!(test.battle().associations().await?, associations);

    Ok(())
}

/// Expect a stored battle [100, 200] to grow to 210 and a killmail at 600 to open a new battle
#[tokio::test]
async fn extends_stored_battle() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 100)
        .with_mock_killmail(2, 200)
        .with_mock_killmail(3, 210)
        .with_mock_killmail(4, 600)
        .with_mock_battle(100, 200)
        .with_association(1, 1)
        .with_association(2, 1)
        .build()
        .await?;

    let summary = BattleService::new(&test.db, config(120))
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    assert_eq!(summary.updated_battle_count, 1);
    assert_eq!(summary.new_battle_count, 1);

    let battles = test.battle().battles().await?;
    assert_eq!(battles.len(), 2);
    assert_eq!((battles[0].id, battles[0].start, battles[0].end), (1, 100, 210));
    assert_eq!((battles[1].start, battles[1].end), (600, 600));
    assert_eq!(test.battle().killmails_of(1).await?, vec![1, 2, 3]);
    assert_eq!(test.battle().killmails_of(battles[1].id).await?, vec![4]);

    Ok(())
}

/// Expect a killmail bridging two stored battles to merge them into the lower ID
#[tokio::test]
async fn merges_bridged_battles() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 0)
        .with_mock_killmail(2, 300)
        .with_mock_killmail(3, 150)
        .with_mock_battle(0, 0)
        .with_mock_battle(300, 300)
        .with_association(1, 1)
        .with_association(2, 2)
        .build()
        .await?;

    let summary = BattleService::new(&test.db, config(150))
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    assert_eq!(summary.merged_battle_count, 1);
    assert_eq!(summary.updated_battle_count, 1);
    assert_eq!(summary.new_battle_count, 0);

    let battles = test.battle().battles().await?;
    assert_eq!(battles.len(), 1);
    assert_eq!((battles[0].id, battles[0].start, battles[0].end), (1, 0, 300));
    assert_eq!(test.battle().killmails_of(1).await?, vec![1, 2, 3]);

    Ok(())
}

/// Expect the participants & locations of every killmail to be merged into the battle
#[tokio::test]
async fn merges_killmail_data() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_killmail(1, 0, factory::mock_killmail_data(10, 20, 30_000_142))
        .with_killmail(2, 1_000, factory::mock_killmail_data(20, 30, 30_002_187))
        .build()
        .await?;

    BattleService::new(&test.db, config(TWENTY_MINUTES))
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    let battles = test.battle().battles().await?;
    assert_eq!(battles.len(), 1);

    let data = &battles[0].data;
    assert_eq!(data["locations"], serde_json::json!([30_000_142, 30_002_187]));
    // 10 lost a ship, 20 attacked on the first & lost a different ship on the second,
    // 30 attacked on the second
    assert_eq!(data["participants"].as_array().map(Vec::len), Some(4));

    Ok(())
}

/// Expect stored battles close to each other but out of reach of every new killmail to stay apart
#[tokio::test]
async fn leaves_unreached_battles_untouched() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 250)
        .with_mock_killmail(2, 375)
        .with_mock_killmail(3, 0)
        .with_mock_battle(200, 300)
        .with_mock_battle(350, 400)
        .with_association(1, 1)
        .with_association(2, 2)
        .build()
        .await?;
    let before = test.battle().battles().await?;

    let summary = BattleService::new(&test.db, config(60))
        .run_clustering_pass()
        .await
        .expect("pass should succeed");

    assert_eq!(summary.new_battle_count, 1);
    assert_eq!(summary.updated_battle_count, 0);
    assert_eq!(summary.merged_battle_count, 0);

    let battles = test.battle().battles().await?;
    assert_eq!(battles.len(), 3);
    assert_eq!(&battles[..2], &before[..]);
    assert_eq!(test.battle().killmails_of(1).await?, vec![1]);
    assert_eq!(test.battle().killmails_of(2).await?, vec![2]);

    Ok(())
}

/// Expect a pass failing after battles were already written to leave nothing behind
#[tokio::test]
async fn rolls_back_failed_pass() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_battle_tables()
        .with_mock_killmail(1, 0)
        .with_mock_killmail(2, 10_000)
        .with_killmail(3, 20_000, serde_json::json!({ "participants": "nobody" }))
        .build()
        .await?;

    // One killmail per batch so the first battle is written before the bad payload is read
    let config = ClusteringConfig {
        window: Duration::milliseconds(60),
        page_size: 2,
        batch_size: 1,
        ..ClusteringConfig::default()
    };
    let result = BattleService::new(&test.db, config)
        .run_clustering_pass()
        .await;

    assert!(result.is_err(), "Expected error, got: {:?}", result);
    assert!(test.battle().battles().await?.is_empty());
    assert!(test.battle().associations().await?.is_empty());

    Ok(())
}
