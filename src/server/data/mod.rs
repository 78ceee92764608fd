//! Database repository layer for all domain entities.
//!
//! Each repository wraps a borrowed `DatabaseConnection`, runs SeaORM queries against the
//! entity models and converts results into domain models at the boundary. Repositories
//! return `DbErr`; business rules and HTTP error mapping live in the service layer.

pub mod address;
pub mod availability;
pub mod document;
pub mod notification;
pub mod session;
pub mod skill;
pub mod stats;
pub mod study_buddy;
pub mod ticket;
pub mod ticket_comment;
pub mod user;


use std::collections::HashMap;

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, Query, SelectStatement, SimpleExpr},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, Order, QueryFilter,
};
use uuid::Uuid;

use crate::{model::api::SortOrder, server::model::user::User};

const LIKE_ESCAPE: char = '\\';

/// Case-insensitive substring match: `LOWER(col) LIKE '%term%' ESCAPE '\'`.
///
/// `%` and `_` in the term match literally.
pub(crate) fn contains_ci<C: ColumnTrait>(col: C, term: &str) -> SimpleExpr {
    use sea_orm::sea_query::ExprTrait;

    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// Case-insensitive membership: `LOWER(col) IN (values)`. Values must already be lowercase.
pub(crate) fn lower_in<C: ColumnTrait>(col: C, values: Vec<String>) -> SimpleExpr {
    use sea_orm::sea_query::ExprTrait;

    Expr::expr(Func::lower(Expr::col(col))).is_in(values)
}

/// Ids of users whose name contains `search`, for matching sessions and tickets by
/// participant name.
pub(crate) fn user_ids_named(search: &str) -> SelectStatement {
    Query::select()
        .column(entity::user::Column::Id)
        .from(entity::user::Entity)
        .and_where(contains_ci(entity::user::Column::Name, search))
        .to_owned()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Loads users by id into a map for attaching participants to sessions and tickets.
///
/// Generic over the connection so it works inside a transaction.
pub(crate) async fn users_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, User>, DbErr> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = entity::prelude::User::find()
        .filter(entity::user::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(users
        .into_iter()
        .map(|u| (u.id, User::from_entity(u)))
        .collect())
}

/// Looks up a user loaded by `users_by_ids`, failing if a foreign key points nowhere.
pub(crate) fn take_user(users: &HashMap<Uuid, User>, id: Uuid) -> Result<User, DbErr> {
    users
        .get(&id)
        .cloned()
        .ok_or_else(|| DbErr::RecordNotFound(format!("User {} not found", id)))
}
