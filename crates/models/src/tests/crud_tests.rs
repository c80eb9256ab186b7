use anyhow::Result;
use chrono::{NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use super::setup_test_db;
use crate::{category, category_of_service, order, order_item, store, user};

pub(crate) async fn insert_user(db: &sea_orm::DatabaseConnection, email: &str, phone: &str) -> Result<user::Model> {
    let now = Utc::now().into();
    let am = user::ActiveModel {
        email: Set(email.to_string()),
        phone: Set(phone.to_string()),
        password_hash: Set("not-a-real-hash".into()),
        first_name: Set("Bob".into()),
        last_name: Set("Tran".into()),
        role: Set(user::DEFAULT_ROLE.into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn test_user_lookup_by_email_and_phone() -> Result<()> {
    let db = setup_test_db().await?;
    let u = insert_user(&db, "bob@example.com", "0901234567").await?;
    assert!(u.id > 0);

    let by_email = user::find_by_email(&db, "bob@example.com").await?.unwrap();
    assert_eq!(by_email.id, u.id);
    let by_phone = user::find_by_phone(&db, "0901234567").await?.unwrap();
    assert_eq!(by_phone.id, u.id);
    assert!(user::find_by_email(&db, "nobody@example.com").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_store_keeps_image_bytes_and_times() -> Result<()> {
    let db = setup_test_db().await?;
    let owner = insert_user(&db, "owner@example.com", "0907654321").await?;
    let bytes = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff];
    let now = Utc::now().into();
    let am = store::ActiveModel {
        name: Set("Pho 24".into()),
        description: Set("Noodles".into()),
        address: Set("1 Le Loi".into()),
        phone: Set("0281234567".into()),
        image_name: Set(Some("logo.png".into())),
        image_type: Set(Some("image/png".into())),
        image: Set(Some(bytes.clone())),
        open_time: Set(NaiveTime::from_hms_opt(7, 0, 0)),
        close_time: Set(NaiveTime::from_hms_opt(22, 30, 0)),
        status: Set("ACTIVE".into()),
        owner_id: Set(owner.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let s = am.insert(&db).await?;

    let found = store::Entity::find_by_id(s.id).one(&db).await?.unwrap();
    assert_eq!(found.image.as_deref(), Some(bytes.as_slice()));
    assert_eq!(found.image_type.as_deref(), Some("image/png"));
    assert_eq!(found.close_time, NaiveTime::from_hms_opt(22, 30, 0));
    assert_eq!(store::count_by_owner(&db, owner.id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_category_and_category_of_service_crud() -> Result<()> {
    let db = setup_test_db().await?;
    let c = category::ActiveModel { name: Set("Food".into()), status: Set("ACTIVE".into()), ..Default::default() }
        .insert(&db)
        .await?;
    let mut am: category::ActiveModel = c.clone().into();
    am.name = Set("Drinks".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.name, "Drinks");

    let cos = category_of_service::ActiveModel {
        name: Set("Delivery".into()),
        image_name: Set(None),
        image_type: Set(None),
        image: Set(None),
        status: Set("ACTIVE".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert!(cos.image.is_none());

    category::Entity::delete_by_id(c.id).exec(&db).await?;
    assert!(category::Entity::find_by_id(c.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_orders_by_user_and_item_cleanup() -> Result<()> {
    let db = setup_test_db().await?;
    let alice = insert_user(&db, "alice@example.com", "0911111111").await?;
    let bob = insert_user(&db, "bob@example.com", "0922222222").await?;

    let mut alice_orders = vec![];
    for total in [1000_i64, 2500] {
        let o = order::ActiveModel {
            user_id: Set(alice.id),
            store_id: Set(None),
            status: Set(order::DEFAULT_STATUS.into()),
            total_amount: Set(total),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        order_item::ActiveModel {
            order_id: Set(o.id),
            product_name: Set("Coffee".into()),
            quantity: Set(1),
            unit_price: Set(total),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        alice_orders.push(o.id);
    }

    let found = order::find_all_by_user_id(&db, alice.id).await?;
    assert_eq!(found.iter().map(|o| o.id).collect::<Vec<_>>(), alice_orders);
    assert!(order::find_all_by_user_id(&db, bob.id).await?.is_empty());
    assert_eq!(order::count_by_user(&db, alice.id).await?, 2);

    assert_eq!(order_item::find_by_orders(&db, &alice_orders).await?.len(), 2);
    assert_eq!(order_item::delete_by_orders(&db, &alice_orders).await?, 2);
    assert!(order_item::find_by_order(&db, alice_orders[0]).await?.is_empty());
    Ok(())
}

#[test]
fn order_line_validation() {
    assert!(order_item::validate_line("Tea", 2, 1500).is_ok());
    assert!(order_item::validate_line("", 2, 1500).is_err());
    assert!(order_item::validate_line("Tea", 0, 1500).is_err());
    assert!(order_item::validate_line("Tea", 1, -1).is_err());
}
