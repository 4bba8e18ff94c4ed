pub mod repositories;

#[cfg(test)]
use crate::models::{DbHairdresser, DbSchedule, DbUser};

/// Pool on `TEST_DATABASE_URL` with the schema in place. `None` when the
/// variable is unset, in which case storage tests return early.
#[cfg(test)]
pub async fn create_test_pool() -> Option<crate::DbPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(4)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Initialize test schema
    crate::schema::initialize_database(&pool)
        .await
        .expect("Failed to initialize test database schema");

    Some(pool)
}

#[cfg(test)]
pub async fn seed_user(pool: &crate::DbPool) -> DbUser {
    use crate::repositories::user::{create_user, UserInput};

    let email = format!("{}@cutandgo.test", uuid::Uuid::new_v4());
    let input = UserInput {
        name: "Ana",
        last_name: "Lopez",
        phone: "600000000",
        email: &email,
        image_extension: None,
    };

    create_user(pool, &input, "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .await
        .expect("Failed to seed user")
}

/// A salon owned by a fresh user, with one active schedule.
#[cfg(test)]
pub async fn seed_hairdresser(pool: &crate::DbPool) -> (DbUser, DbHairdresser, DbSchedule) {
    use crate::repositories::{
        hairdresser::{create_hairdresser, HairdresserInput},
        schedule::create_schedule,
    };

    let owner = seed_user(pool).await;
    let input = HairdresserInput {
        name: "Corte Fino",
        phone: "910000000",
        address: "Calle Mayor 1",
        postal_code: 28013,
        image_extension: Some("png"),
    };
    let hairdresser = create_hairdresser(pool, owner.id, &input)
        .await
        .expect("Failed to seed hairdresser");
    let schedule = create_schedule(pool, hairdresser.id, "Winter", true)
        .await
        .expect("Failed to seed schedule");

    (owner, hairdresser, schedule)
}
