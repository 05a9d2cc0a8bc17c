//! Entity tests against a live PostgreSQL; each test skips itself when
//! `SKIP_DB_TESTS` is set or the database cannot be reached.
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{app, db, errors::ModelError, user};

static MIGRATED: OnceCell<bool> = OnceCell::const_new();

async fn try_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {}", e);
                    false
                }
            }
        })
        .await;
    migrated.then_some(db)
}

fn unique_email() -> String {
    format!("model_{}@example.com", Uuid::new_v4())
}

#[tokio::test]
async fn user_create_defaults_admin_false() -> anyhow::Result<()> {
    let Some(db) = try_db().await else { return Ok(()) };

    let email = unique_email();
    let created = user::create(&db, &email, b"$argon2id$fake".to_vec()).await?;
    assert!(created.id > 0);
    assert!(!created.is_admin);

    let found = user::find_by_email(&db, &email).await?.expect("user present");
    assert_eq!(found.id, created.id);
    assert_eq!(found.pass_hash, b"$argon2id$fake".to_vec());

    assert_eq!(user::admin_flag(&db, created.id).await?, Some(false));
    Ok(())
}

#[tokio::test]
async fn user_duplicate_email_is_classified() -> anyhow::Result<()> {
    let Some(db) = try_db().await else { return Ok(()) };

    let email = unique_email();
    user::create(&db, &email, b"h1".to_vec()).await?;
    let err = user::create(&db, &email, b"h2".to_vec()).await.unwrap_err();
    assert!(matches!(err, ModelError::Duplicate(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn missing_rows_are_none() -> anyhow::Result<()> {
    let Some(db) = try_db().await else { return Ok(()) };

    assert!(user::find_by_email(&db, &unique_email()).await?.is_none());
    assert!(user::admin_flag(&db, i64::MAX).await?.is_none());
    assert!(app::find(&db, i32::MAX).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn app_create_and_find() -> anyhow::Result<()> {
    let Some(db) = try_db().await else { return Ok(()) };

    let id = (Uuid::new_v4().as_u128() % 1_000_000) as i32 + 1_000;
    let name = format!("app_{}", Uuid::new_v4());
    let secret = Uuid::new_v4().to_string();
    app::create(&db, id, &name, &secret).await?;

    let found = app::find(&db, id).await?.expect("app present");
    assert_eq!(found.name, name);
    assert_eq!(found.secret, secret);
    Ok(())
}

#[test]
fn debug_hides_secrets() {
    let u = user::Model { id: 1, email: "a@b.c".into(), pass_hash: b"hash".to_vec(), is_admin: false };
    assert!(!format!("{u:?}").contains("hash"));
    let a = app::Model { id: 1, name: "web".into(), secret: "topsecret".into() };
    assert!(!format!("{a:?}").contains("topsecret"));
}

#[test]
fn validation_happens_before_db() {
    // Validation errors never touch the connection, so a disconnected handle is enough.
    let db = DatabaseConnection::Disconnected;
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    let err = rt.block_on(user::create(&db, "  ", b"h".to_vec())).unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    let err = rt.block_on(app::create(&db, 1, "web", "")).unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
}
