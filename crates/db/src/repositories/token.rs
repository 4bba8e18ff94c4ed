use eyre::Result;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub const TOKEN_LENGTH: usize = 50;

/// Random alphanumeric token used for e-mail confirmation and salon access.
pub fn generate_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Stores `token` as the user's temporary token. Returns `false` when the
/// user does not exist.
pub async fn assign_user_token(pool: &Pool<Postgres>, user_id: Uuid, token: &str) -> Result<bool> {
    tracing::debug!("Assigning temp token to user: {}", user_id);

    let result = sqlx::query("UPDATE users SET temp_token = $2 WHERE id = $1")
        .bind(user_id)
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn validate_user_token(pool: &Pool<Postgres>, user_id: Uuid, token: &str) -> Result<bool> {
    // An empty stored token means none was ever assigned
    let valid = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND temp_token <> '' AND temp_token = $2)",
    )
    .bind(user_id)
    .bind(token)
    .fetch_one(pool)
    .await?;

    Ok(valid)
}

pub async fn validate_hairdresser_token(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    token: &str,
) -> Result<bool> {
    let valid = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM hairdressers WHERE id = $1 AND token = $2)",
    )
    .bind(hairdresser_id)
    .bind(token)
    .fetch_one(pool)
    .await?;

    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_alphanumeric_and_fixed_length() {
        let token = generate_token();

        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_token());
    }
}
