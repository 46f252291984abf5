use sqlx::PgPool;
use std::sync::Arc;
use snipurl::domain::entities::NewMapping;
use snipurl::domain::repositories::MappingRepository;
use snipurl::error::AppError;
use snipurl::infrastructure::persistence::PgMappingRepository;

fn new_mapping(code: &str, target: &str) -> NewMapping {
    NewMapping {
        code: code.to_string(),
        target: target.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_insert_mapping(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    let mapping = repo
        .insert(new_mapping("abc123", "https://example.com/a"))
        .await
        .unwrap();

    assert_eq!(mapping.code, "abc123");
    assert_eq!(mapping.target, "https://example.com/a");
    assert_eq!(mapping.clicks, 0);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_insert_duplicate_code_conflicts(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    repo.insert(new_mapping("dup1", "https://example.com/1"))
        .await
        .unwrap();
    let result = repo.insert(new_mapping("dup1", "https://example.com/2")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_find_by_code(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    repo.insert(new_mapping("find1", "https://example.com/find"))
        .await
        .unwrap();

    let found = repo.find_by_code("find1").await.unwrap();
    assert_eq!(found.unwrap().target, "https://example.com/find");

    let missing = repo.find_by_code("missing").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    repo.insert(new_mapping("inc1", "https://example.com/inc"))
        .await
        .unwrap();

    assert!(repo.increment_clicks("inc1").await.unwrap());
    assert!(repo.increment_clicks("inc1").await.unwrap());
    assert!(!repo.increment_clicks("missing").await.unwrap());

    let mapping = repo.find_by_code("inc1").await.unwrap().unwrap();
    assert_eq!(mapping.clicks, 2);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgMappingRepository::new(Arc::new(pool)));
    repo.insert(new_mapping("hot1", "https://example.com/hot"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.increment_clicks("hot1").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let mapping = repo.find_by_code("hot1").await.unwrap().unwrap();
    assert_eq!(mapping.clicks, 50);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_list_all_in_insertion_order(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    for code in ["one1", "two2", "three3"] {
        repo.insert(new_mapping(code, "https://example.com"))
            .await
            .unwrap();
    }

    let codes: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.code)
        .collect();
    assert_eq!(codes, vec!["one1", "two2", "three3"]);

    assert!(repo.health_check().await);
}
