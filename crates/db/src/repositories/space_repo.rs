//! Repository for the `spaces` and `space_members` tables.
//!
//! Membership is maintained only by the explicit add/remove operations here;
//! no read path ever mutates it.

use sqlx::PgPool;

use quill_core::types::DbId;

use crate::models::space::{CreateSpace, Space};

/// Column list for spaces queries.
const COLUMNS: &str = "id, title, description, created_by, created_at, updated_at";

/// Provides CRUD and membership operations for spaces.
pub struct SpaceRepo;

impl SpaceRepo {
    /// Create a new space. The creator is recorded but not auto-enrolled as
    /// a member.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSpace,
        created_by: Option<DbId>,
    ) -> Result<Space, sqlx::Error> {
        let query = format!(
            "INSERT INTO spaces (title, description, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a space by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE id = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all spaces, ordered by title.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces ORDER BY title ASC, id ASC");
        sqlx::query_as::<_, Space>(&query).fetch_all(pool).await
    }

    /// List the spaces a user is a member of, ordered by title.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Space>, sqlx::Error> {
        let query = "SELECT s.id, s.title, s.description, s.created_by, s.created_at, s.updated_at
             FROM spaces s
             JOIN space_members m ON m.space_id = s.id
             WHERE m.user_id = $1
             ORDER BY s.title ASC, s.id ASC";
        sqlx::query_as::<_, Space>(query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Is the user a member of the space?
    pub async fn is_member(pool: &PgPool, space_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1::BIGINT FROM space_members WHERE space_id = $1 AND user_id = $2",
        )
        .bind(space_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Add a member to a space. Idempotent; returns `true` if a row was
    /// actually inserted.
    pub async fn add_member(
        pool: &PgPool,
        space_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO space_members (space_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (space_id, user_id) DO NOTHING",
        )
        .bind(space_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a member from a space. Returns `true` if a row was removed.
    pub async fn remove_member(
        pool: &PgPool,
        space_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM space_members WHERE space_id = $1 AND user_id = $2",
        )
        .bind(space_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List member user ids for a space.
    pub async fn list_members(pool: &PgPool, space_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT user_id FROM space_members WHERE space_id = $1 ORDER BY user_id",
        )
        .bind(space_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
