//! Integration tests for `MongoUserRepository` against a live MongoDB server.
//!
//! Set `USER_SERVICE_TEST_MONGODB_HOST` (and optionally
//! `USER_SERVICE_TEST_MONGODB_PORT`) to run them. Each test works in its own
//! collection and drops it afterwards.

use std::time::Duration;

use mongodb::Database;
use rstest::rstest;
use user_service::domain::ports::{UserPersistenceError, UserRepository};
use user_service::domain::{User, UserDraft, UserId};
use user_service::outbound::persistence::MongoUserRepository;

#[path = "support/live_mongo.rs"]
mod live_mongo;

use live_mongo::{drop_collection, live_database, unique_collection_name};

const NEVER_ISSUED: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

fn user(name: &str, email: &str) -> User {
    UserDraft::try_from_parts(name, "123456", email)
        .expect("valid user fields")
        .into_user()
        .expect("password hashes")
}

fn repository(database: &Database, collection: &str) -> MongoUserRepository {
    MongoUserRepository::new(database, collection).with_operation_timeout(Duration::from_secs(3))
}

#[rstest]
#[tokio::test]
async fn lifecycle_round_trips_through_mongodb() {
    let Some(database) = live_database().await else {
        return;
    };
    let collection = unique_collection_name();
    let repo = repository(&database, &collection);

    let first = repo
        .create(&user("Dmitry", "os_dimay@mail.ru"))
        .await
        .expect("create first");
    let second = repo
        .create(&user("Dmitry2", "os_dimay@mail.ru2"))
        .await
        .expect("create second");
    assert_ne!(first, second);
    assert_eq!(second.as_str().len(), 24);

    let fetched = repo.find_one(&second).await.expect("find second");
    assert_eq!(fetched.id(), Some(&second));
    assert_eq!(fetched.name(), "Dmitry2");
    assert!(fetched.password_hash().starts_with("$argon2id$"));

    repo.update(&fetched.with_email("newEmail@here.ok"))
        .await
        .expect("update second");
    let updated = repo.find_one(&second).await.expect("find updated");
    assert_eq!(updated.email(), "newEmail@here.ok");
    assert_eq!(updated.name(), "Dmitry2");

    repo.delete(&second).await.expect("delete second");
    assert_eq!(
        repo.find_one(&second).await,
        Err(UserPersistenceError::not_found(second.as_str()))
    );

    let untouched = repo.find_one(&first).await.expect("first survives");
    assert_eq!(untouched.email(), "os_dimay@mail.ru");

    drop_collection(&database, &collection).await;
}

#[rstest]
#[tokio::test]
async fn missing_users_are_not_found() {
    let Some(database) = live_database().await else {
        return;
    };
    let collection = unique_collection_name();
    let repo = repository(&database, &collection);
    let id = UserId::new(NEVER_ISSUED);

    assert_eq!(
        repo.find_one(&id).await,
        Err(UserPersistenceError::not_found(NEVER_ISSUED))
    );
    assert_eq!(
        repo.update(&user("Dmitry", "os_dimay@mail.ru").with_id(id.clone()))
            .await,
        Err(UserPersistenceError::not_found(NEVER_ISSUED))
    );
    assert_eq!(
        repo.delete(&id).await,
        Err(UserPersistenceError::not_found(NEVER_ISSUED))
    );

    drop_collection(&database, &collection).await;
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("65a1f0c2e4b0a1b2c3d4e5fg")]
#[tokio::test]
async fn malformed_identifiers_never_reach_the_server(#[case] raw: &str) {
    let Some(database) = live_database().await else {
        return;
    };
    let repo = repository(&database, &unique_collection_name());

    let result = repo.find_one(&UserId::new(raw)).await;

    assert_eq!(result, Err(UserPersistenceError::invalid_identifier(raw)));
}
