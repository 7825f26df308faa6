use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        common::{InsertResult, UpdateResult},
        orders::{CreateOrderRequest, OrderWithItems},
    },
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        seller_items::{ActiveModel as SellerItemActive, Column as SellerItemCol, Entity as SellerItems},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ItemState, Order, OrderItem, OrderStatus},
    state::AppState,
};

/// Persist the checkout snapshot and fan each line out into its seller's
/// pending ledger. One transaction covers the order, its items and the
/// fan-out, so a partially-written snapshot cannot be observed.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<InsertResult> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("order has no items".into()));
    }

    let mut line_sum: i64 = 0;
    for item in &payload.items {
        if item.quantity <= 0 {
            return Err(AppError::BadRequest(
                "item quantity must be greater than 0".into(),
            ));
        }
        if item.unit_price < 0 {
            return Err(AppError::BadRequest(
                "item price must not be negative".into(),
            ));
        }
        line_sum += item.unit_price * i64::from(item.quantity);
    }
    if line_sum != payload.total_price {
        return Err(AppError::BadRequest(format!(
            "total_price {} does not match line sum {}",
            payload.total_price, line_sum
        )));
    }

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_email: Set(user.email.clone()),
        total_price: Set(payload.total_price),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        paid_at: Set(None),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    for item in &payload.items {
        let item_id = Uuid::new_v4();

        OrderItemActive {
            id: Set(item_id),
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            name: Set(item.name.clone()),
            seller_email: Set(item.seller_email.clone()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
        }
        .insert(&txn)
        .await?;

        SellerItemActive {
            item_id: Set(item_id),
            seller_email: Set(item.seller_email.clone()),
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            state: Set(ItemState::Pending.as_str().to_string()),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.email),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total_price": order.total_price })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(InsertResult {
        acknowledged: true,
        inserted_id: order.id,
    })
}

/// Admin-only `pending -> paid` transition. Re-applying it to a paid order is
/// an already-satisfied no-op; the seller ledger moves match rows by per-item
/// id with a pending-state guard, inside the same transaction as the status
/// update.
pub async fn mark_paid(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<UpdateResult> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if order.status == OrderStatus::Paid.as_str() {
        txn.commit().await?;
        return Ok(UpdateResult::new(1, 0));
    }

    let item_ids: Vec<Uuid> = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|item| item.id)
        .collect();

    let mut active: OrderActive = order.into();
    active.status = Set(OrderStatus::Paid.as_str().to_string());
    active.paid_at = Set(Some(Utc::now().into()));
    let order = active.update(&txn).await?;

    SellerItems::update_many()
        .col_expr(SellerItemCol::State, Expr::value(ItemState::Sold.as_str()))
        .filter(
            SellerItemCol::ItemId
                .is_in(item_ids)
                .and(SellerItemCol::State.eq(ItemState::Pending.as_str())),
        )
        .exec(&txn)
        .await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.email),
        "order_mark_paid",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(UpdateResult::new(1, 1))
}

/// The buyer's orders, newest first.
pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<OrderWithItems>> {
    let orders = Orders::find()
        .filter(OrderCol::UserEmail.eq(user.email.clone()))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    attach_items(&state.orm, orders).await
}

pub async fn list_all_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<OrderWithItems>> {
    ensure_admin(user)?;
    let orders = Orders::find().all(&state.orm).await?;
    attach_items(&state.orm, orders).await
}

async fn attach_items<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<OrderWithItems>> {
    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    if !ids.is_empty() {
        for item in OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(ids))
            .all(conn)
            .await?
        {
            by_order
                .entry(item.order_id)
                .or_default()
                .push(order_item_from_entity(item));
        }
    }

    orders
        .into_iter()
        .map(|model| {
            let items = by_order.remove(&model.id).unwrap_or_default();
            Ok(OrderWithItems {
                order: order_from_entity(model)?,
                items,
            })
        })
        .collect()
}

fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    let status = OrderStatus::parse(&model.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("unknown order status {}", model.status))
    })?;

    Ok(Order {
        id: model.id,
        user_email: model.user_email,
        total_price: model.total_price,
        status,
        paid_at: model.paid_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        name: model.name,
        seller_email: model.seller_email,
        quantity: model.quantity,
        unit_price: model.unit_price,
    }
}
