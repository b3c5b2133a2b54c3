//! Repository tests against a real, migrated database.
//!
//! Runs on in-memory SQLite by default; the schema is the one the service
//! migrates at startup.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn fields_for(builder: &TestDataBuilder, suffix: &str) -> UserFields {
    UserFields {
        name: builder.name("user", suffix),
        age: builder.age(),
        city: "Pune".to_string(),
        state: "MH".to_string(),
        pincode: builder.pincode(),
    }
}

#[tokio::test]
async fn test_create_then_get_round_trips_every_field() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("round_trip");

    let input = fields_for(&builder, "main");
    let created = repo.create(input.clone()).await.unwrap();
    assert_eq!(created.fields(), input);

    let fetched = assert_some(repo.get(created.id).await.unwrap(), "user should exist");
    assert_uuid_eq(fetched.id, created.id, "fetched id");
    assert_eq!(fetched.fields(), input);
}

#[tokio::test]
async fn test_identifiers_are_unique() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unique_ids");

    let mut ids = Vec::new();
    for i in 0..50 {
        let user = repo
            .create(fields_for(&builder, &i.to_string()))
            .await
            .unwrap();
        ids.push(user.id);
    }

    assert_all_unique(&ids, "created ids");
    assert_eq!(repo.list().await.unwrap().len(), 50);
}

#[tokio::test]
async fn test_concurrent_creates_all_persist() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("concurrent");

    let creates = (0..10).map(|i| repo.create(fields_for(&builder, &i.to_string())));
    let users: Vec<User> = futures::future::try_join_all(creates).await.unwrap();

    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    assert_all_unique(&ids, "concurrent ids");
    assert_eq!(repo.list().await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_list_is_in_creation_order() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_order");

    let first = repo.create(fields_for(&builder, "a")).await.unwrap();
    let second = repo.create(fields_for(&builder, "b")).await.unwrap();

    let ids: Vec<Uuid> = repo.list().await.unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_never_created_id_is_consistently_missing() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("never_created");
    let id = builder.uuid();

    assert!(repo.get(id).await.unwrap().is_none());
    assert!(matches!(
        repo.update(id, fields_for(&builder, "x")).await,
        Err(UserError::NotFound(missing)) if missing == id
    ));
    assert!(matches!(
        repo.delete(id).await,
        Err(UserError::NotFound(missing)) if missing == id
    ));
}

#[tokio::test]
async fn test_deleted_id_is_consistently_missing() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("deleted");

    let user = repo.create(fields_for(&builder, "main")).await.unwrap();
    repo.delete(user.id).await.unwrap();

    assert!(repo.get(user.id).await.unwrap().is_none());
    assert!(matches!(
        repo.update(user.id, fields_for(&builder, "again")).await,
        Err(UserError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete(user.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_is_full_replace() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("full_replace");

    let original = repo.create(fields_for(&builder, "before")).await.unwrap();
    let other = repo.create(fields_for(&builder, "other")).await.unwrap();

    let replacement = UserFields {
        name: "Replaced Name".to_string(),
        age: 99,
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
        pincode: "400001".to_string(),
    };
    let updated = repo.update(original.id, replacement.clone()).await.unwrap();
    assert_uuid_eq(updated.id, original.id, "updated id");

    let fetched = assert_some(repo.get(original.id).await.unwrap(), "updated user");
    assert_eq!(fetched.fields(), replacement);

    // Other rows are untouched
    let untouched = assert_some(repo.get(other.id).await.unwrap(), "other user");
    assert_eq!(untouched, other);
}

#[tokio::test]
async fn test_update_with_identical_values_succeeds() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("identical_update");

    let user = repo.create(fields_for(&builder, "same")).await.unwrap();
    let updated = repo.update(user.id, user.fields()).await.unwrap();

    assert_eq!(updated, user);
}

#[tokio::test]
async fn test_schema_rejects_rows_that_skip_validation() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("schema_checks");

    let invalid = UserFields {
        age: 500,
        ..fields_for(&builder, "bad")
    };

    assert!(matches!(
        repo.create(invalid).await,
        Err(UserError::Storage(_))
    ));
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_service_over_sql_repository_validates_before_storage() {
    let db = TestDatabase::new().await;
    let service = UserService::new(SqlUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_validation");

    let invalid = UserFields {
        name: String::new(),
        age: 200,
        ..fields_for(&builder, "bad")
    };

    match service.create_user(invalid).await {
        Err(UserError::Validation(errors)) => {
            let fields = errors.field_errors();
            assert!(fields.contains_key("name"));
            assert!(fields.contains_key("age"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(service.list_users().await.unwrap().is_empty());
}
