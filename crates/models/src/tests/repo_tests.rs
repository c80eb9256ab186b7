use anyhow::Result;
use sea_orm::{ActiveModelTrait, Set};

use super::setup_test_db;
use crate::{category, repo};

async fn seed_categories(db: &sea_orm::DatabaseConnection, n: usize) -> Result<Vec<i32>> {
    let mut ids = vec![];
    for i in 0..n {
        let c = category::ActiveModel { name: Set(format!("cat-{i}")), status: Set("ACTIVE".into()), ..Default::default() }
            .insert(db)
            .await?;
        ids.push(c.id);
    }
    Ok(ids)
}

#[tokio::test]
async fn test_find_all_orders_by_id_and_paginates() -> Result<()> {
    let db = setup_test_db().await?;
    let ids = seed_categories(&db, 5).await?;

    let all = repo::find_all::<category::Entity, _>(&db, None).await?;
    assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), ids);

    let second_page = repo::find_all::<category::Entity, _>(&db, Some((1, 2))).await?;
    assert_eq!(second_page.iter().map(|c| c.id).collect::<Vec<_>>(), ids[2..4].to_vec());
    Ok(())
}

#[tokio::test]
async fn test_exists_and_delete_by_id() -> Result<()> {
    let db = setup_test_db().await?;
    let ids = seed_categories(&db, 1).await?;
    assert!(repo::exists_by_id::<category::Entity, _>(&db, ids[0]).await?);
    assert_eq!(repo::delete_by_id::<category::Entity, _>(&db, ids[0]).await?, 1);
    assert!(!repo::exists_by_id::<category::Entity, _>(&db, ids[0]).await?);
    assert_eq!(repo::delete_by_id::<category::Entity, _>(&db, ids[0]).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_delete_by_ids_ignores_missing() -> Result<()> {
    let db = setup_test_db().await?;
    let ids = seed_categories(&db, 3).await?;
    let deleted = repo::delete_by_ids::<category::Entity, _>(&db, &[ids[0], ids[1], 999]).await?;
    assert_eq!(deleted, 2);
    let left = repo::find_all::<category::Entity, _>(&db, None).await?;
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, ids[2]);
    assert_eq!(repo::delete_by_ids::<category::Entity, _>(&db, &[]).await?, 0);
    Ok(())
}
