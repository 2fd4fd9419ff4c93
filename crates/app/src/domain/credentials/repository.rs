//! Credentials Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query, query_as, sqlite::SqliteRow};

use crate::crypto::EncryptedSecret;

const GET_MASTER_CREDENTIAL_SQL: &str = include_str!("sql/get_master_credential.sql");
const SET_MASTER_CREDENTIAL_SQL: &str = include_str!("sql/set_master_credential.sql");

/// The singleton config row.
#[derive(Debug, Clone)]
pub(crate) struct MasterCredentialRow {
    pub(crate) encrypted: EncryptedSecret,
}

#[derive(Debug, Clone)]
pub(crate) struct SqliteCredentialsRepository {
    pool: SqlitePool,
}

impl SqliteCredentialsRepository {
    #[must_use]
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) async fn get_master_credential(
        &self,
    ) -> Result<Option<MasterCredentialRow>, sqlx::Error> {
        query_as::<Sqlite, MasterCredentialRow>(GET_MASTER_CREDENTIAL_SQL)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn set_master_credential(
        &self,
        encrypted: &EncryptedSecret,
    ) -> Result<(), sqlx::Error> {
        query(SET_MASTER_CREDENTIAL_SQL)
            .bind(encrypted.ciphertext.as_slice())
            .bind(encrypted.nonce.as_slice())
            .bind(Timestamp::now().as_millisecond())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, SqliteRow> for MasterCredentialRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            encrypted: EncryptedSecret {
                ciphertext: row.try_get("master_api_key_ciphertext")?,
                nonce: row.try_get("master_api_key_nonce")?,
            },
        })
    }
}
