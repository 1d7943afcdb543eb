use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credential;
use crate::domain::authentication::models::DisplayName;
use crate::domain::authentication::models::EmailAddress;
use crate::domain::authentication::models::RefreshToken;
use crate::domain::authentication::models::User;
use crate::domain::authentication::models::UserId;
use crate::domain::authentication::ports::CredentialStore;

/// Credential store backed by the `users`, `credentials` and `refresh_tokens` tables.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |e: &dyn std::fmt::Display| {
            AuthError::Internal(format!("Stored user {} is corrupt: {}", row.id, e))
        };

        Ok(User {
            id: UserId(row.id),
            name: DisplayName::new(row.name).map_err(|e| corrupt(&e))?,
            email: EmailAddress::new(row.email).map_err(|e| corrupt(&e))?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Credential {
            user_id: UserId(row.user_id),
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    user_id: Uuid,
    token: String,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshToken {
            user_id: UserId(row.user_id),
            token: row.token,
            created_at: row.created_at,
        }
    }
}

fn store_error(e: sqlx::Error) -> AuthError {
    AuthError::StoreUnavailable(e.to_string())
}

async fn insert_user<'e, E>(
    executor: E,
    name: &DisplayName,
    email: &EmailAddress,
) -> Result<User, AuthError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, name, email)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name.as_str())
    .bind(email.as_str())
    .fetch_one(executor)
    .await
    .map_err(|e| {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                return AuthError::DuplicateEmail(email.as_str().to_string());
            }
        }
        store_error(e)
    })?;

    row.try_into()
}

async fn insert_credential<'e, E>(
    executor: E,
    user_id: &UserId,
    password_hash: &str,
) -> Result<Credential, AuthError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CredentialRow>(
        r#"
        INSERT INTO credentials (user_id, password_hash)
        VALUES ($1, $2)
        RETURNING user_id, password_hash, created_at
        "#,
    )
    .bind(user_id.0)
    .bind(password_hash)
    .fetch_one(executor)
    .await
    .map(Credential::from)
    .map_err(store_error)
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(User::try_from).transpose()
    }

    async fn create_user(
        &self,
        name: &DisplayName,
        email: &EmailAddress,
    ) -> Result<User, AuthError> {
        insert_user(&self.pool, name, email).await
    }

    async fn create_credential(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<Credential, AuthError> {
        insert_credential(&self.pool, user_id, password_hash).await
    }

    async fn create_user_with_credential(
        &self,
        name: &DisplayName,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let user = insert_user(&mut *tx, name, email).await?;
        insert_credential(&mut *tx, &user.id, password_hash).await?;

        tx.commit().await.map_err(store_error)?;

        Ok(user)
    }

    async fn find_credential_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Credential>, AuthError> {
        sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, password_hash, created_at
            FROM credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Credential::from))
        .map_err(store_error)
    }

    async fn create_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
    ) -> Result<RefreshToken, AuthError> {
        sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            INSERT INTO refresh_tokens (user_id, token)
            VALUES ($1, $2)
            RETURNING user_id, token, created_at
            "#,
        )
        .bind(user_id.0)
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map(RefreshToken::from)
        .map_err(store_error)
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT user_id, token, created_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(RefreshToken::from))
        .map_err(store_error)
    }

    async fn delete_refresh_token(&self, token: &str) -> Result<u64, AuthError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected())
    }
}
