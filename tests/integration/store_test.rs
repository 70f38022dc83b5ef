//! Storage-level properties checked against PostgreSQL.
//!
//! Skipped unless `FOODBAG_TEST_DATABASE_URL` points at a disposable
//! database; the memory store is covered by the unit tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use uuid::Uuid;

use foodbag_core::config::{DatabaseConfig, StoreProvider};
use foodbag_database::{ReserveOutcome, Stores};
use foodbag_entity::booking::CreateBooking;
use foodbag_entity::food_bag::{FoodBagFields, OwnershipScope};
use foodbag_entity::user::{CreateUser, UserRole};

async fn postgres_stores() -> Option<Stores> {
    let url = std::env::var("FOODBAG_TEST_DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        provider: StoreProvider::Postgres,
        url,
        ..DatabaseConfig::default()
    };
    Some(
        Stores::connect(&config)
            .await
            .expect("Failed to connect to test database"),
    )
}

async fn user(stores: &Stores, role: UserRole) -> Uuid {
    stores
        .users
        .create(&CreateUser {
            email: format!("{}@store.test", Uuid::now_v7()),
            password_hash: "not-a-real-hash".to_string(),
            role,
            full_name: None,
        })
        .await
        .expect("create user")
        .id
}

fn fields(quantity: i32, pickup_offset: Duration) -> FoodBagFields {
    FoodBagFields {
        name: "Store test".to_string(),
        description: None,
        photo_url: None,
        price: 10.0,
        discounted_price: 3.0,
        quantity,
        address: format!("{} Test Lane", Uuid::now_v7()),
        pickup_time: Utc::now() + pickup_offset,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_postgres_reserve_never_oversells() {
    let Some(stores) = postgres_stores().await else {
        return;
    };
    let owner = user(&stores, UserRole::Establishment).await;
    let bag = stores
        .food_bags
        .create(owner, &fields(3, Duration::days(1)))
        .await
        .expect("create bag");

    let mut clients = Vec::new();
    for _ in 0..10 {
        clients.push(user(&stores, UserRole::Client).await);
    }

    let bookings = Arc::clone(&stores.bookings);
    let bag_id = bag.id;
    let attempts = clients.into_iter().map(|user_id| {
        let bookings = Arc::clone(&bookings);
        tokio::spawn(async move {
            bookings
                .reserve(&CreateBooking {
                    user_id,
                    food_bag_id: bag_id,
                    quantity: 1,
                })
                .await
        })
    });
    let outcomes: Vec<ReserveOutcome> = join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked").expect("reserve failed"))
        .collect();

    let committed = outcomes
        .iter()
        .filter(|o| matches!(o, ReserveOutcome::Committed(_)))
        .count();
    assert_eq!(committed, 3);

    let stored = stores
        .food_bags
        .find_by_id(bag.id)
        .await
        .expect("find")
        .expect("bag exists");
    assert_eq!(stored.quantity, 0);
}

#[tokio::test]
async fn test_postgres_ownership_and_purge() {
    let Some(stores) = postgres_stores().await else {
        return;
    };
    let owner = user(&stores, UserRole::Establishment).await;
    let other = user(&stores, UserRole::Establishment).await;
    let client = user(&stores, UserRole::Client).await;

    let bag = stores
        .food_bags
        .create(owner, &fields(2, Duration::seconds(1)))
        .await
        .expect("create bag");

    let foreign = stores
        .food_bags
        .replace(bag.id, OwnershipScope::OwnedBy(other), &fields(9, Duration::days(1)))
        .await
        .expect("replace");
    assert!(foreign.is_none());
    assert!(
        !stores
            .food_bags
            .delete_cascade(bag.id, OwnershipScope::OwnedBy(other))
            .await
            .expect("delete")
    );

    let outcome = stores
        .bookings
        .reserve(&CreateBooking {
            user_id: client,
            food_bag_id: bag.id,
            quantity: 1,
        })
        .await
        .expect("reserve");
    assert!(matches!(outcome, ReserveOutcome::Committed(_)));

    let later = Utc::now() + Duration::seconds(5);
    assert!(stores.food_bags.purge_expired(later).await.expect("purge") >= 1);
    assert!(
        stores
            .food_bags
            .find_by_id(bag.id)
            .await
            .expect("find")
            .is_none()
    );
    assert!(
        stores
            .bookings
            .list_by_user(client)
            .await
            .expect("list")
            .is_empty()
    );
    assert_eq!(stores.food_bags.purge_expired(later).await.expect("purge"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_postgres_owner_delete_races_reservations() {
    let Some(stores) = postgres_stores().await else {
        return;
    };
    let owner = user(&stores, UserRole::Establishment).await;
    let bag = stores
        .food_bags
        .create(owner, &fields(50, Duration::days(1)))
        .await
        .expect("create bag");

    let mut clients = Vec::new();
    for _ in 0..20 {
        clients.push(user(&stores, UserRole::Client).await);
    }

    let bag_id = bag.id;
    let reservations: Vec<_> = clients
        .into_iter()
        .map(|user_id| {
            let bookings = Arc::clone(&stores.bookings);
            tokio::spawn(async move {
                bookings
                    .reserve(&CreateBooking {
                        user_id,
                        food_bag_id: bag_id,
                        quantity: 1,
                    })
                    .await
            })
        })
        .collect();
    let users = Arc::clone(&stores.users);
    let removal = tokio::spawn(async move { users.delete_cascade(owner).await });

    let outcomes = join_all(reservations).await;
    let removed = removal.await.expect("task panicked");

    assert!(removed.expect("owner delete must not fail"));
    for outcome in outcomes {
        let outcome = outcome.expect("task panicked").expect("reserve failed");
        assert!(matches!(
            outcome,
            ReserveOutcome::Committed(_) | ReserveOutcome::NotFound
        ));
    }
    assert!(
        stores
            .food_bags
            .find_by_id(bag_id)
            .await
            .expect("find")
            .is_none()
    );
}
