//! `SeaORM` implementation of the record store.

mod convert;

use bizdesk_core::movement::{Movement, MovementStatus, NewMovement, StatusPatch};
use bizdesk_core::records::{Account, Category, Party, RecordStatus};
use bizdesk_core::store::{
    AccountFilter, CategoryFilter, Collection, DateRange, FinanceStore, MovementFilter,
    MovementOrder, PartyFilter, StoreError,
};
use bizdesk_shared::types::{AccountId, MovementId, PartyId};
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, NullOrdering, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, Order, QueryFilter, QueryOrder, Select, Set,
};
use tracing::{debug, error};

use crate::entities::{accounts, categories, movements, parties};
use convert::{
    account_from_model, category_from_model, movement_from_model, movement_to_active,
    party_from_model,
};

fn backend(e: DbErr) -> StoreError {
    error!(error = %e, "Database operation failed");
    StoreError::Backend(e.to_string())
}

/// Case-insensitive `LIKE '%needle%'` on `column`, with wildcards escaped.
fn contains_ci(column: impl sea_orm::sea_query::IntoColumnRef, needle: &str) -> SimpleExpr {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{escaped}%"))
}

fn search_term(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}

fn bounded<E: EntityTrait>(mut query: Select<E>, column: impl ColumnTrait, range: DateRange) -> Select<E> {
    if let Some(from) = range.from {
        query = query.filter(column.gte(from));
    }
    if let Some(to) = range.to {
        query = query.filter(column.lt(to));
    }
    query
}

/// Record store backed by Postgres through `SeaORM`.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Creates a new store over an open connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl FinanceStore for SeaOrmStore {
    async fn list_movements(&self, filter: &MovementFilter) -> Result<Vec<Movement>, StoreError> {
        let mut query = movements::Entity::find();

        if let Some(movement_type) = filter.movement_type {
            query = query.filter(movements::Column::MovementType.is_in(movement_type.labels().iter().copied()));
        }
        if !filter.statuses.is_empty() {
            let labels = filter.statuses.iter().flat_map(|s| s.labels().iter().copied());
            query = query.filter(movements::Column::Status.is_in(labels));
        }
        if let Some(account_id) = filter.account_id {
            query = query.filter(movements::Column::AccountId.eq(account_id.into_inner()));
        }
        if let Some(term) = search_term(filter.search.as_deref()) {
            query = query.filter(contains_ci(movements::Column::Description, term));
        }
        query = bounded(query, movements::Column::DueDate, filter.due);
        query = bounded(query, movements::Column::PaymentDate, filter.paid);
        if !filter.paid.is_unbounded() {
            query = query.filter(movements::Column::PaymentDate.is_not_null());
        }

        query = match filter.order {
            MovementOrder::DueDateDesc => query.order_by_desc(movements::Column::DueDate),
            MovementOrder::DueDateAsc => query.order_by_asc(movements::Column::DueDate),
            MovementOrder::PaymentDateDesc => query.order_by_with_nulls(
                movements::Column::PaymentDate,
                Order::Desc,
                NullOrdering::Last,
            ),
        }
        .order_by_asc(movements::Column::Id);

        let rows = query.all(&self.db).await.map_err(backend)?;
        debug!(count = rows.len(), "Loaded movements");
        rows.into_iter().map(movement_from_model).collect()
    }

    async fn find_movement(&self, id: MovementId) -> Result<Option<Movement>, StoreError> {
        movements::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(backend)?
            .map(movement_from_model)
            .transpose()
    }

    async fn insert_movement(&self, movement: NewMovement) -> Result<Movement, StoreError> {
        let id = movement.id;
        let row = movement_to_active(movement, Utc::now())?
            .insert(&self.db)
            .await
            .map_err(backend)?;
        debug!(movement_id = %id, "Inserted movement");
        movement_from_model(row)
    }

    async fn update_movement_status(
        &self,
        id: MovementId,
        expected: &[MovementStatus],
        patch: StatusPatch,
    ) -> Result<Movement, StoreError> {
        let now = Utc::now();
        let expected_labels = expected.iter().flat_map(|s| s.labels().iter().copied());

        // Status check and write happen in one statement.
        let result = movements::Entity::update_many()
            .col_expr(movements::Column::Status, Expr::value(patch.status.as_str()))
            .col_expr(movements::Column::PaymentDate, Expr::value(patch.payment_date))
            .col_expr(movements::Column::UpdatedAt, Expr::value(now))
            .filter(movements::Column::Id.eq(id.into_inner()))
            .filter(movements::Column::Status.is_in(expected_labels))
            .exec(&self.db)
            .await
            .map_err(backend)?;

        if result.rows_affected == 0 {
            return match self.find_movement(id).await? {
                None => Err(StoreError::not_found(Collection::Movements, id)),
                Some(current) => {
                    debug!(movement_id = %id, status = %current.status, "Status changed before update");
                    Err(StoreError::conflict(Collection::Movements, id))
                }
            };
        }

        debug!(movement_id = %id, status = %patch.status, "Updated movement status");
        self.find_movement(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Movements, id))
    }

    async fn list_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StoreError> {
        let mut query = accounts::Entity::find().order_by_asc(accounts::Column::Name);
        if let Some(status) = filter.status {
            query = query.filter(accounts::Column::Status.is_in(status.labels().iter().copied()));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(accounts::Column::Kind.is_in(kind.labels().iter().copied()));
        }
        let rows = query.all(&self.db).await.map_err(backend)?;
        rows.into_iter().map(account_from_model).collect()
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(backend)?
            .map(account_from_model)
            .transpose()
    }

    async fn list_categories(&self, filter: &CategoryFilter) -> Result<Vec<Category>, StoreError> {
        let mut query = categories::Entity::find().order_by_asc(categories::Column::Name);
        if let Some(status) = filter.status {
            query = query.filter(categories::Column::Status.is_in(status.labels().iter().copied()));
        }
        if let Some(category_type) = filter.category_type {
            query = query.filter(
                categories::Column::CategoryType.is_in(category_type.labels().iter().copied()),
            );
        }
        let rows = query.all(&self.db).await.map_err(backend)?;
        rows.into_iter().map(category_from_model).collect()
    }

    async fn list_parties(&self, filter: &PartyFilter) -> Result<Vec<Party>, StoreError> {
        let mut query = parties::Entity::find().order_by_asc(parties::Column::Name);
        if let Some(status) = filter.status {
            query = query.filter(parties::Column::Status.is_in(status.labels().iter().copied()));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(parties::Column::Kind.is_in(kind.labels().iter().copied()));
        }
        if let Some(term) = search_term(filter.search.as_deref()) {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(parties::Column::Name, term))
                    .add(contains_ci(parties::Column::Email, term))
                    .add(contains_ci(parties::Column::Phone, term)),
            );
        }
        let rows = query.all(&self.db).await.map_err(backend)?;
        rows.into_iter().map(party_from_model).collect()
    }

    async fn update_party_status(
        &self,
        id: PartyId,
        status: RecordStatus,
    ) -> Result<Party, StoreError> {
        let row = parties::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found(Collection::Parties, id))?;

        let mut active = row.into_active_model();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().into());

        let row = active.update(&self.db).await.map_err(backend)?;
        debug!(party_id = %id, status = %status, "Updated party status");
        party_from_model(row)
    }

    async fn delete_party(&self, id: PartyId) -> Result<(), StoreError> {
        let result = parties::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(backend)?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(Collection::Parties, id));
        }
        debug!(party_id = %id, "Deleted party");
        Ok(())
    }
}
