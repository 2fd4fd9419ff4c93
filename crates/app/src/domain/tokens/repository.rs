//! Tokens Repository

use jiff::Timestamp;
use sqlx::{
    FromRow, Row, Sqlite, SqlitePool, Transaction, query, query_as, query_scalar, sqlite::SqliteRow,
};
use zonegate_core::{
    actions::Action,
    ids::{PermissionId, TokenId},
};

use crate::{
    crypto::HashedSecret,
    domain::tokens::{
        data::NewPermission,
        records::{PermissionRecord, TokenRecord},
    },
};

const CREATE_TOKEN_SQL: &str = include_str!("sql/create_token.sql");
const FIND_TOKEN_BY_HASH_SQL: &str = include_str!("sql/find_token_by_hash.sql");
const GET_TOKEN_SQL: &str = include_str!("sql/get_token.sql");
const LIST_TOKENS_SQL: &str = include_str!("sql/list_tokens.sql");
const DELETE_TOKEN_SQL: &str = include_str!("sql/delete_token.sql");
const HAS_ADMIN_TOKEN_SQL: &str = include_str!("sql/has_admin_token.sql");
const COUNT_ADMIN_TOKENS_SQL: &str = include_str!("sql/count_admin_tokens.sql");
const CREATE_PERMISSION_SQL: &str = include_str!("sql/create_permission.sql");
const LIST_PERMISSIONS_SQL: &str = include_str!("sql/list_permissions.sql");
const DELETE_PERMISSION_SQL: &str = include_str!("sql/delete_permission.sql");

/// SQLite-backed tokens repository.
#[derive(Debug, Clone)]
pub(crate) struct SqliteTokensRepository {
    pool: SqlitePool,
}

impl SqliteTokensRepository {
    #[must_use]
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    pub(crate) async fn create_token(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
        hash: &HashedSecret,
        is_admin: bool,
    ) -> Result<TokenRecord, sqlx::Error> {
        query_as::<Sqlite, TokenRecord>(CREATE_TOKEN_SQL)
            .bind(name)
            .bind(hash.as_str())
            .bind(is_admin)
            .bind(Timestamp::now().as_millisecond())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_token_by_hash(
        &self,
        hash: &HashedSecret,
    ) -> Result<Option<TokenRecord>, sqlx::Error> {
        query_as::<Sqlite, TokenRecord>(FIND_TOKEN_BY_HASH_SQL)
            .bind(hash.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn get_token(&self, id: TokenId) -> Result<TokenRecord, sqlx::Error> {
        query_as::<Sqlite, TokenRecord>(GET_TOKEN_SQL)
            .bind(id.into_i64())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn list_tokens(&self) -> Result<Vec<TokenRecord>, sqlx::Error> {
        query_as::<Sqlite, TokenRecord>(LIST_TOKENS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn find_token(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: TokenId,
    ) -> Result<Option<TokenRecord>, sqlx::Error> {
        query_as::<Sqlite, TokenRecord>(GET_TOKEN_SQL)
            .bind(id.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_token(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: TokenId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TOKEN_SQL)
            .bind(id.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_admin_tokens(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Sqlite, i64>(COUNT_ADMIN_TOKENS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn has_admin_token(&self) -> Result<bool, sqlx::Error> {
        query_scalar::<Sqlite, bool>(HAS_ADMIN_TOKEN_SQL)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_permission(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        token: TokenId,
        permission: &NewPermission,
    ) -> Result<PermissionRecord, sqlx::Error> {
        let allowed_actions = encode_json(&permission.allowed_actions)?;
        let record_types = encode_json(&permission.record_types)?;

        query_as::<Sqlite, PermissionRecord>(CREATE_PERMISSION_SQL)
            .bind(token.into_i64())
            .bind(permission.zone_id)
            .bind(allowed_actions)
            .bind(record_types)
            .bind(Timestamp::now().as_millisecond())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_permissions(
        &self,
        token: TokenId,
    ) -> Result<Vec<PermissionRecord>, sqlx::Error> {
        query_as::<Sqlite, PermissionRecord>(LIST_PERMISSIONS_SQL)
            .bind(token.into_i64())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn delete_permission(
        &self,
        token: TokenId,
        permission: PermissionId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PERMISSION_SQL)
            .bind(permission.into_i64())
            .bind(token.into_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for TokenRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TokenId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            token_hash: HashedSecret::from_stored(row.try_get("token_hash")?),
            is_admin: row.try_get("is_admin")?,
            created_at: decode_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for PermissionRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let allowed_actions: String = row.try_get("allowed_actions")?;
        let record_types: String = row.try_get("record_types")?;

        Ok(Self {
            id: PermissionId::new(row.try_get("id")?),
            token_id: TokenId::new(row.try_get("token_id")?),
            zone_id: row.try_get("zone_id")?,
            allowed_actions: decode_json::<Vec<Action>>("allowed_actions", &allowed_actions)?,
            record_types: decode_json::<Vec<String>>("record_types", &record_types)?,
            created_at: decode_timestamp(row, "created_at")?,
        })
    }
}

fn decode_timestamp(row: &SqliteRow, column: &str) -> sqlx::Result<Timestamp> {
    let millis: i64 = row.try_get(column)?;

    Timestamp::from_millisecond(millis).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn decode_json<T: serde::de::DeserializeOwned>(column: &str, raw: &str) -> sqlx::Result<T> {
    serde_json::from_str(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn encode_json<T: serde::Serialize>(value: &T) -> sqlx::Result<String> {
    serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
