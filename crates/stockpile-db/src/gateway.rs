//! # Item Access Gateway
//!
//! The only component permitted to issue SQL against the `items` table.
//! Enforces payload validation, translates item-level addressing into a row
//! lookup, and broadcasts change events after successful mutations.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Item Access Gateway                            │
//! │                                                                     │
//! │  caller ──► query(addressing, options)  ──► Vec<ItemRecord>         │
//! │         ──► insert(addressing, values)  ──► Addressing::Item(id)    │
//! │         ──► update(addressing, values,  ──► rows affected           │
//! │         ──► delete(addressing, filter)  ──► rows deleted            │
//! │         ──► resolve_type(addressing)    ──► ContentKind             │
//! │                                                                     │
//! │  Item-level addressing FORCES the row filter to `id = ?`;           │
//! │  caller-supplied filters are ignored for that form.                 │
//! │                                                                     │
//! │  Mutations that touched rows broadcast a ChangeEvent; failed or     │
//! │  zero-row mutations stay silent.                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gateway is stateless between calls apart from the pool and event
//! channel it delegates to; there is no internal locking beyond what the
//! storage adapter provides, and no cancellation path - each operation runs
//! to completion or failure.

use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

use stockpile_core::contract::TABLE_ITEMS;
use stockpile_core::types::NewItem;
use stockpile_core::validation::{validate_insert, validate_update};
use stockpile_core::{Addressing, Column, ContentKind, ItemRecord, ItemValues, ValidationError};

use crate::error::DbError;
use crate::events::ChangeEvent;

// =============================================================================
// Errors
// =============================================================================

/// Failures a gateway operation can report.
///
/// ## Failure Semantics
/// - `Validation`: user-input error. Reported to the caller, not retried,
///   not logged as a system fault. No partial write happened.
/// - `UnsupportedAddressing`: programmer/integration error. Fail fast, do
///   not retry.
/// - `Storage`: I/O or constraint violation at the storage layer. Surfaced
///   as an operation failure, not retried automatically.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The write payload failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation does not accept this addressing form.
    #[error("{operation} is not supported for {addressing}")]
    UnsupportedAddressing {
        operation: &'static str,
        addressing: Addressing,
    },

    /// The storage layer failed.
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        GatewayError::Storage(DbError::from(err))
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Query Options
// =============================================================================

/// Projection, filter and sort for a [`ItemGateway::query`] call.
///
/// The filter fragment and sort expression are passed to SQLite as-is, with
/// `?` placeholders bound positionally from `args` - the same pass-through
/// contract the collaborators rely on. A malformed fragment surfaces as a
/// storage failure from the prepare step.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Columns to select; `None` (or empty) selects every column.
    pub projection: Option<Vec<Column>>,
    /// `WHERE` fragment with `?` placeholders. Ignored for item-level
    /// addressing.
    pub filter: Option<String>,
    /// Positional arguments for `filter`.
    pub args: Vec<String>,
    /// `ORDER BY` expression.
    pub sort: Option<String>,
}

impl QueryOptions {
    /// Options selecting every column, every row, storage order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the selected columns.
    pub fn projection(mut self, columns: impl Into<Vec<Column>>) -> Self {
        self.projection = Some(columns.into());
        self
    }

    /// Sets the `WHERE` fragment.
    pub fn filter(mut self, fragment: impl Into<String>) -> Self {
        self.filter = Some(fragment.into());
        self
    }

    /// Appends one positional filter argument.
    pub fn bind(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the `ORDER BY` expression.
    pub fn sort(mut self, expression: impl Into<String>) -> Self {
        self.sort = Some(expression.into());
        self
    }
}

// =============================================================================
// Gateway
// =============================================================================

/// A positional bind argument for dynamically-built statements.
#[derive(Debug, Clone)]
enum BindArg {
    Int(Option<i64>),
    Text(Option<String>),
}

/// Gateway for all reads and writes of the `items` table.
///
/// ## Usage
/// ```rust,ignore
/// let gateway = db.items();
///
/// // List every item
/// let rows = gateway.query(&Addressing::Collection, QueryOptions::new()).await?;
///
/// // One item by id
/// let row = gateway
///     .query(&Addressing::Item(1), QueryOptions::new())
///     .await?
///     .into_iter()
///     .next();
/// ```
#[derive(Debug, Clone)]
pub struct ItemGateway {
    pool: SqlitePool,
    changes: broadcast::Sender<ChangeEvent>,
}

impl ItemGateway {
    /// Creates a gateway over an existing pool and event channel.
    pub(crate) fn new(pool: SqlitePool, changes: broadcast::Sender<ChangeEvent>) -> Self {
        ItemGateway { pool, changes }
    }

    /// Registers an observer for change events from this gateway's database
    /// instance.
    ///
    /// Delivery is best-effort and unordered; use [`ChangeEvent::affects`]
    /// to filter for the addressing being watched.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    /// Content-type tag for an addressing form.
    pub fn resolve_type(&self, addressing: &Addressing) -> ContentKind {
        addressing.kind()
    }

    /// Queries rows at an addressing.
    ///
    /// Returns a finite, one-shot sequence of row records; re-query to
    /// refresh. For item-level addressing the row filter is forced to the
    /// parsed id and any caller filter in `options` is ignored.
    pub async fn query(
        &self,
        addressing: &Addressing,
        options: QueryOptions,
    ) -> GatewayResult<Vec<ItemRecord>> {
        let columns = match &options.projection {
            Some(cols) if !cols.is_empty() => cols
                .iter()
                .map(Column::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            _ => "*".to_string(),
        };

        let mut sql = format!("SELECT {columns} FROM {TABLE_ITEMS}");
        let mut binds: Vec<BindArg> = Vec::new();

        match addressing {
            Addressing::Collection => {
                if let Some(filter) = &options.filter {
                    sql.push_str(" WHERE ");
                    sql.push_str(filter);
                    binds.extend(options.args.iter().cloned().map(|a| BindArg::Text(Some(a))));
                }
            }
            Addressing::Item(id) => {
                sql.push_str(" WHERE id = ?");
                binds.push(BindArg::Int(Some(*id)));
            }
        }

        if let Some(sort) = &options.sort {
            sql.push_str(" ORDER BY ");
            sql.push_str(sort);
        }

        debug!(%addressing, sql = %sql, "Querying items");

        let mut query = sqlx::query_as::<_, ItemRecord>(&sql);
        for bind in binds {
            query = match bind {
                BindArg::Int(v) => query.bind(v),
                BindArg::Text(v) => query.bind(v),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        debug!(count = rows.len(), "Query returned rows");
        Ok(rows)
    }

    /// Inserts a new item and returns its item-level addressing.
    ///
    /// Only collection addressing accepts inserts. The payload is validated
    /// as a whole before any store call - a failure creates no row. On
    /// success a change event scoped to the collection is broadcast; a
    /// storage-level failure propagates without one.
    pub async fn insert(
        &self,
        addressing: &Addressing,
        values: ItemValues,
    ) -> GatewayResult<Addressing> {
        if let Addressing::Item(_) = addressing {
            return Err(GatewayError::UnsupportedAddressing {
                operation: "insert",
                addressing: *addressing,
            });
        }

        let item: NewItem = validate_insert(&values)?;

        debug!(name = %item.name, "Inserting item");

        let sql = format!(
            "INSERT INTO {TABLE_ITEMS} \
             (name, price, quantity, image, supplier, supplier_email) \
             VALUES (?, ?, ?, ?, ?, ?)"
        );
        let result = sqlx::query(&sql)
            .bind(&item.name)
            .bind(&item.price)
            .bind(item.quantity)
            .bind(&item.image)
            .bind(&item.supplier)
            .bind(&item.supplier_email)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Item inserted");

        self.notify(Addressing::Collection);
        Ok(Addressing::Item(id))
    }

    /// Updates rows at an addressing; returns the affected-row count.
    ///
    /// Validation covers only the fields present in `values`. An empty
    /// payload short-circuits: zero rows affected, no store call, no event.
    /// Updating an id that does not exist returns 0, not an error. A change
    /// event is broadcast only when the affected count is non-zero.
    pub async fn update(
        &self,
        addressing: &Addressing,
        values: ItemValues,
        filter: Option<&str>,
        args: &[String],
    ) -> GatewayResult<u64> {
        validate_update(&values)?;

        if values.is_empty() {
            return Ok(0);
        }

        let mut sets: Vec<&'static str> = Vec::new();
        let mut binds: Vec<BindArg> = Vec::new();

        push_text(&mut sets, &mut binds, "name = ?", &values.name);
        push_text(&mut sets, &mut binds, "price = ?", &values.price);
        if values.quantity.is_present() {
            sets.push("quantity = ?");
            binds.push(BindArg::Int(values.quantity.as_set().copied()));
        }
        push_text(&mut sets, &mut binds, "image = ?", &values.image);
        push_text(&mut sets, &mut binds, "supplier = ?", &values.supplier);
        push_text(
            &mut sets,
            &mut binds,
            "supplier_email = ?",
            &values.supplier_email,
        );

        let mut sql = format!("UPDATE {TABLE_ITEMS} SET {}", sets.join(", "));
        self.append_row_filter(&mut sql, &mut binds, addressing, filter, args);

        debug!(%addressing, sql = %sql, "Updating items");

        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = match bind {
                BindArg::Int(v) => query.bind(v),
                BindArg::Text(v) => query.bind(v),
            };
        }

        let affected = query.execute(&self.pool).await?.rows_affected();
        debug!(affected, "Update complete");

        if affected != 0 {
            self.notify(*addressing);
        }
        Ok(affected)
    }

    /// Deletes rows at an addressing; returns the deleted-row count.
    ///
    /// Collection addressing with no filter removes every row. A change
    /// event is broadcast only when the count is non-zero.
    pub async fn delete(
        &self,
        addressing: &Addressing,
        filter: Option<&str>,
        args: &[String],
    ) -> GatewayResult<u64> {
        let mut sql = format!("DELETE FROM {TABLE_ITEMS}");
        let mut binds: Vec<BindArg> = Vec::new();
        self.append_row_filter(&mut sql, &mut binds, addressing, filter, args);

        debug!(%addressing, sql = %sql, "Deleting items");

        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = match bind {
                BindArg::Int(v) => query.bind(v),
                BindArg::Text(v) => query.bind(v),
            };
        }

        let deleted = query.execute(&self.pool).await?.rows_affected();
        debug!(deleted, "Delete complete");

        if deleted != 0 {
            self.notify(*addressing);
        }
        Ok(deleted)
    }

    /// Appends the row filter for a mutation: item addressing forces
    /// `id = ?`, collection addressing takes the caller filter verbatim.
    fn append_row_filter(
        &self,
        sql: &mut String,
        binds: &mut Vec<BindArg>,
        addressing: &Addressing,
        filter: Option<&str>,
        args: &[String],
    ) {
        match addressing {
            Addressing::Collection => {
                if let Some(filter) = filter {
                    sql.push_str(" WHERE ");
                    sql.push_str(filter);
                    binds.extend(args.iter().cloned().map(|a| BindArg::Text(Some(a))));
                }
            }
            Addressing::Item(id) => {
                sql.push_str(" WHERE id = ?");
                binds.push(BindArg::Int(Some(*id)));
            }
        }
    }

    /// Broadcasts a change event. Fire-and-forget: absent or lagging
    /// receivers are ignored.
    fn notify(&self, addressing: Addressing) {
        let _ = self.changes.send(ChangeEvent { addressing });
    }
}

/// Pushes a `col = ?` fragment when a text field participates in the write.
/// `Null` binds SQL NULL; the storage layer's own constraints decide whether
/// that is acceptable for the column.
fn push_text(
    sets: &mut Vec<&'static str>,
    binds: &mut Vec<BindArg>,
    fragment: &'static str,
    field: &stockpile_core::Field<String>,
) {
    if field.is_present() {
        sets.push(fragment);
        binds.push(BindArg::Text(field.as_set().cloned()));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    use stockpile_core::{Field, Item};

    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn laptop_values() -> ItemValues {
        ItemValues::new()
            .name("Laptop Hp")
            .price("45,000")
            .quantity(1)
            .image("res://x")
            .supplier("raj")
            .supplier_email("mail@example.com")
    }

    async fn all_rows(gateway: &ItemGateway) -> Vec<ItemRecord> {
        gateway
            .query(&Addressing::Collection, QueryOptions::new())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn insert_then_query_by_id_round_trips() {
        let db = test_db().await;
        let gateway = db.items();

        let assigned = gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();
        assert_eq!(assigned, Addressing::Item(1));

        let rows = gateway
            .query(&assigned, QueryOptions::new())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        let item: Item = rows.into_iter().next().unwrap().into_item().unwrap();
        assert_eq!(
            item,
            Item {
                id: 1,
                name: "Laptop Hp".into(),
                price: "45,000".into(),
                quantity: 1,
                image: "res://x".into(),
                supplier: "raj".into(),
                supplier_email: "mail@example.com".into(),
            }
        );
    }

    #[tokio::test]
    async fn insert_missing_field_creates_no_row() {
        let db = test_db().await;
        let gateway = db.items();

        let strippers: [(fn(&mut ItemValues), &str); 6] = [
            (|v| v.price = Field::Absent, "price"),
            (|v| v.quantity = Field::Absent, "quantity"),
            (|v| v.name = Field::Absent, "name"),
            (|v| v.image = Field::Absent, "image"),
            (|v| v.supplier = Field::Absent, "supplier"),
            (|v| v.supplier_email = Field::Absent, "email"),
        ];

        for (strip, field) in strippers {
            let mut values = laptop_values();
            strip(&mut values);
            let err = gateway
                .insert(&Addressing::Collection, values)
                .await
                .unwrap_err();
            match err {
                GatewayError::Validation(v) => assert_eq!(v.field(), field),
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        assert!(all_rows(&gateway).await.is_empty());
    }

    #[tokio::test]
    async fn insert_rejects_item_addressing() {
        let db = test_db().await;
        let gateway = db.items();

        let err = gateway
            .insert(&Addressing::Item(3), laptop_values())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UnsupportedAddressing {
                operation: "insert",
                addressing: Addressing::Item(3),
            }
        ));
        assert!(all_rows(&gateway).await.is_empty());
    }

    #[tokio::test]
    async fn update_with_empty_values_short_circuits() {
        let db = test_db().await;
        let gateway = db.items();
        gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();

        let mut events = gateway.subscribe();
        let affected = gateway
            .update(&Addressing::Item(1), ItemValues::new(), None, &[])
            .await
            .unwrap();

        assert_eq!(affected, 0);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn update_missing_row_returns_zero_not_error() {
        let db = test_db().await;
        let gateway = db.items();
        let mut events = gateway.subscribe();

        let affected = gateway
            .update(
                &Addressing::Item(999),
                ItemValues::new().quantity(5),
                None,
                &[],
            )
            .await
            .unwrap();

        assert_eq!(affected, 0);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn item_addressing_overrides_caller_filter() {
        let db = test_db().await;
        let gateway = db.items();
        gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();
        gateway
            .insert(&Addressing::Collection, laptop_values().name("Mouse"))
            .await
            .unwrap();

        // A filter pointing at row 2 must be ignored for item addressing.
        let affected = gateway
            .update(
                &Addressing::Item(1),
                ItemValues::new().quantity(9),
                Some("id = ?"),
                &["2".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let rows = all_rows(&gateway).await;
        assert_eq!(rows[0].quantity, Some(9));
        assert_eq!(rows[1].quantity, Some(1));
    }

    #[tokio::test]
    async fn collection_update_honors_caller_filter() {
        let db = test_db().await;
        let gateway = db.items();
        gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();
        gateway
            .insert(
                &Addressing::Collection,
                laptop_values().name("Mouse").quantity(7),
            )
            .await
            .unwrap();

        let affected = gateway
            .update(
                &Addressing::Collection,
                ItemValues::new().quantity(0),
                Some("quantity = ?"),
                &["7".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn update_price_guard() {
        let db = test_db().await;
        let gateway = db.items();
        gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();

        let err = gateway
            .update(
                &Addressing::Item(1),
                ItemValues::new().price("-5"),
                None,
                &[],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::InvalidField { field: "price" })
        ));

        // Free-form decimal strings pass through and are stored verbatim.
        let affected = gateway
            .update(
                &Addressing::Item(1),
                ItemValues::new().price("1,200"),
                None,
                &[],
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);
        let rows = all_rows(&gateway).await;
        assert_eq!(rows[0].price.as_deref(), Some("1,200"));
    }

    #[tokio::test]
    async fn storage_failure_surfaces_and_stays_silent() {
        let db = test_db().await;
        let gateway = db.items();
        gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();

        let mut events = gateway.subscribe();

        // supplier is NOT NULL at the storage layer; the gateway's update
        // validation does not cover it, so the constraint fires below.
        let mut values = ItemValues::new();
        values.supplier = Field::Null;
        let err = gateway
            .update(&Addressing::Item(1), values, None, &[])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Storage(DbError::QueryFailed(_))
        ));
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn delete_collection_removes_all_rows() {
        let db = test_db().await;
        let gateway = db.items();
        gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();
        gateway
            .insert(&Addressing::Collection, laptop_values().name("Mouse"))
            .await
            .unwrap();

        let deleted = gateway
            .delete(&Addressing::Collection, None, &[])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(all_rows(&gateway).await.is_empty());
    }

    #[tokio::test]
    async fn notifications_follow_mutations() {
        let db = test_db().await;
        let gateway = db.items();
        let mut events = gateway.subscribe();

        gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();
        assert_eq!(
            events.try_recv().unwrap().addressing,
            Addressing::Collection
        );

        gateway
            .update(
                &Addressing::Item(1),
                ItemValues::new().quantity(0),
                None,
                &[],
            )
            .await
            .unwrap();
        let event = events.try_recv().unwrap();
        assert_eq!(event.addressing, Addressing::Item(1));
        assert!(event.affects(&Addressing::Collection));

        gateway
            .delete(&Addressing::Item(1), None, &[])
            .await
            .unwrap();
        assert_eq!(events.try_recv().unwrap().addressing, Addressing::Item(1));

        // Zero-row delete stays silent.
        let deleted = gateway
            .delete(&Addressing::Item(1), None, &[])
            .await
            .unwrap();
        assert_eq!(deleted, 0);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn query_projection_and_sort() {
        let db = test_db().await;
        let gateway = db.items();
        gateway
            .insert(&Addressing::Collection, laptop_values().name("Zebra Mug"))
            .await
            .unwrap();
        gateway
            .insert(&Addressing::Collection, laptop_values().name("Apple Pen"))
            .await
            .unwrap();

        let rows = gateway
            .query(
                &Addressing::Collection,
                QueryOptions::new()
                    .projection(vec![Column::Id, Column::Name, Column::Quantity])
                    .sort("name"),
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("Apple Pen"));
        assert_eq!(rows[1].name.as_deref(), Some("Zebra Mug"));
        // Unselected columns come back empty, so the record is partial.
        assert_eq!(rows[0].price, None);
        assert!(rows[0].clone().into_item().is_none());
    }

    #[tokio::test]
    async fn query_malformed_filter_is_a_storage_failure() {
        let db = test_db().await;
        let gateway = db.items();

        let err = gateway
            .query(
                &Addressing::Collection,
                QueryOptions::new().filter("nonsense("),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Storage(_)));
    }

    #[tokio::test]
    async fn resolve_type_tags() {
        let db = test_db().await;
        let gateway = db.items();
        assert_eq!(
            gateway.resolve_type(&Addressing::Collection),
            ContentKind::Collection
        );
        assert_eq!(
            gateway.resolve_type(&Addressing::Item(4)),
            ContentKind::Single
        );
    }

    /// The end-to-end lifecycle: insert, read back, zero the quantity,
    /// delete, observe the empty result.
    #[tokio::test]
    async fn full_item_lifecycle() {
        let db = test_db().await;
        let gateway = db.items();

        let assigned = gateway
            .insert(&Addressing::Collection, laptop_values())
            .await
            .unwrap();
        assert_eq!(assigned, Addressing::Item(1));

        let item = gateway
            .query(&assigned, QueryOptions::new())
            .await
            .unwrap()
            .into_iter()
            .next()
            .and_then(ItemRecord::into_item)
            .unwrap();
        assert_eq!(item.name, "Laptop Hp");
        assert_eq!(item.quantity, 1);

        let affected = gateway
            .update(&assigned, ItemValues::new().quantity(0), None, &[])
            .await
            .unwrap();
        assert_eq!(affected, 1);
        let rows = gateway.query(&assigned, QueryOptions::new()).await.unwrap();
        assert_eq!(rows[0].quantity, Some(0));

        let deleted = gateway.delete(&assigned, None, &[]).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(gateway
            .query(&assigned, QueryOptions::new())
            .await
            .unwrap()
            .is_empty());
    }
}
