use std::marker::PhantomData;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::database::fields::{bind_value, FieldValue, Fields};
use crate::database::manager::DatabaseError;

/// Which rows of a table a caller may see and touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Catalogue tables without an owner column
    Public,
    /// Rows whose owner column equals the given id
    Owner(i64),
}

/// A table served by the generic [`Repository`]
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Human name used in "not found" messages
    const LABEL: &'static str;
    /// Column holding the owner id; `None` for public tables
    const OWNER_COLUMN: Option<&'static str>;
    const ORDER_BY: &'static str = "id ASC";
}

/// Ownership-scoped CRUD over one table.
///
/// Every operation takes a [`Scope`]. Owned tables refuse [`Scope::Public`]
/// and public tables refuse [`Scope::Owner`], so a handler cannot silently
/// drop the owner filter. Rows outside the scope behave exactly like rows
/// that do not exist.
pub struct Repository<T> {
    pool: SqlitePool,
    _phantom: PhantomData<T>,
}

impl<T: Resource> Repository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list(&self, scope: Scope) -> Result<Vec<T>, DatabaseError> {
        let owner = owner_filter::<T>(scope)?;
        let sql = match owner {
            Some((column, _)) => format!(
                "SELECT * FROM {} WHERE {} = ? ORDER BY {}",
                T::TABLE,
                column,
                T::ORDER_BY
            ),
            None => format!("SELECT * FROM {} ORDER BY {}", T::TABLE, T::ORDER_BY),
        };
        debug!("{}", sql);

        let mut q = sqlx::query_as::<_, T>(&sql);
        if let Some((_, owner_id)) = owner {
            q = q.bind(owner_id);
        }
        Ok(q.fetch_all(&self.pool).await?)
    }

    pub async fn find(&self, scope: Scope, id: i64) -> Result<Option<T>, DatabaseError> {
        let owner = owner_filter::<T>(scope)?;
        let sql = format!("SELECT * FROM {} WHERE id = ?{}", T::TABLE, owner_clause(owner));
        debug!("{}", sql);

        let mut q = sqlx::query_as::<_, T>(&sql).bind(id);
        if let Some((_, owner_id)) = owner {
            q = q.bind(owner_id);
        }
        Ok(q.fetch_optional(&self.pool).await?)
    }

    pub async fn get(&self, scope: Scope, id: i64) -> Result<T, DatabaseError> {
        self.find(scope, id).await?.ok_or_else(not_found::<T>)
    }

    /// Insert a row bound to the scope's owner and return it as stored
    pub async fn create(&self, scope: Scope, fields: Fields) -> Result<T, DatabaseError> {
        let owner = owner_filter::<T>(scope)?;
        if fields.is_empty() && owner.is_none() {
            return Err(DatabaseError::EmptyWrite(T::TABLE));
        }

        let mut columns: Vec<&'static str> = Vec::with_capacity(fields.len() + 1);
        if let Some((column, _)) = owner {
            columns.push(column);
        }
        columns.extend(fields.columns());

        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            T::TABLE,
            columns.join(", "),
            placeholders
        );
        debug!("{}", sql);

        let mut q = sqlx::query_as::<_, T>(&sql);
        if let Some((_, owner_id)) = owner {
            q = q.bind(owner_id);
        }
        for value in fields.into_values() {
            q = bind_value(q, value);
        }
        Ok(q.fetch_one(&self.pool).await?)
    }

    /// Overwrite only the given columns and return the updated row
    pub async fn update(&self, scope: Scope, id: i64, fields: Fields) -> Result<T, DatabaseError> {
        let owner = owner_filter::<T>(scope)?;
        if fields.is_empty() {
            return self.get(scope, id).await;
        }

        let assignments: Vec<String> = fields
            .columns()
            .map(|c| format!("{} = ?", c))
            .chain(std::iter::once("updated_at = CURRENT_TIMESTAMP".to_string()))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{} RETURNING *",
            T::TABLE,
            assignments.join(", "),
            owner_clause(owner)
        );
        debug!("{}", sql);

        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in fields.into_values() {
            q = bind_value(q, value);
        }
        q = q.bind(id);
        if let Some((_, owner_id)) = owner {
            q = q.bind(owner_id);
        }
        q.fetch_optional(&self.pool).await?.ok_or_else(not_found::<T>)
    }

    /// Remove a row and return it as it was just before deletion
    pub async fn delete(&self, scope: Scope, id: i64) -> Result<T, DatabaseError> {
        let owner = owner_filter::<T>(scope)?;
        let sql = format!("DELETE FROM {} WHERE id = ?{} RETURNING *", T::TABLE, owner_clause(owner));
        debug!("{}", sql);

        let mut q = sqlx::query_as::<_, T>(&sql).bind(id);
        if let Some((_, owner_id)) = owner {
            q = q.bind(owner_id);
        }
        q.fetch_optional(&self.pool).await?.ok_or_else(not_found::<T>)
    }
}

fn owner_filter<T: Resource>(scope: Scope) -> Result<Option<(&'static str, i64)>, DatabaseError> {
    match (T::OWNER_COLUMN, scope) {
        (Some(column), Scope::Owner(id)) => Ok(Some((column, id))),
        (None, Scope::Public) => Ok(None),
        (Some(column), Scope::Public) => Err(DatabaseError::ScopeRequired {
            table: T::TABLE,
            column,
        }),
        (None, Scope::Owner(_)) => Err(DatabaseError::ScopeNotApplicable(T::TABLE)),
    }
}

fn owner_clause(owner: Option<(&'static str, i64)>) -> String {
    owner
        .map(|(column, _)| format!(" AND {} = ?", column))
        .unwrap_or_default()
}

fn not_found<T: Resource>() -> DatabaseError {
    DatabaseError::NotFound(format!("{} not found", T::LABEL))
}

/// Helper for handlers that need a bare value
pub fn text(value: impl Into<String>) -> FieldValue {
    FieldValue::Text(value.into())
}
