use axum::Router;
use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{SessionResponse, TokenRequest},
        cart::{AddToCartRequest, CartLine, CartView},
        catalog::CategoryWithProducts,
        common::{InsertResult, UpdateResult},
        orders::{CreateOrderRequest, NewOrderItem, OrderWithItems},
        payments::{CreateIntentRequest, CreateIntentResponse},
        sales::SalesSummary,
        users::{ChangeRoleRequest, SignupRequest, SignupResponse},
    },
    models::{Category, Order, OrderItem, OrderStatus, Product, Role, User},
    routes::{auth, cart, categories, health, orders, payments, products, sales, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::issue_token,
        auth::logout,
        users::signup,
        users::list_users,
        users::check_role,
        users::change_role,
        categories::list_categories,
        categories::get_category,
        categories::rebuild_categories,
        products::list_products,
        cart::get_cart,
        cart::add_item,
        cart::change_quantity,
        cart::clear_cart,
        orders::create_order,
        orders::update_payment_status,
        orders::list_orders,
        orders::list_all_orders,
        payments::create_payment_intent,
        sales::total_sales,
        sales::seller_total_sales
    ),
    components(schemas(
        TokenRequest,
        SessionResponse,
        SignupRequest,
        SignupResponse,
        ChangeRoleRequest,
        UpdateResult,
        InsertResult,
        AddToCartRequest,
        CartLine,
        CartView,
        CategoryWithProducts,
        CreateOrderRequest,
        NewOrderItem,
        OrderWithItems,
        CreateIntentRequest,
        CreateIntentResponse,
        SalesSummary,
        User,
        Role,
        Product,
        Category,
        Order,
        OrderStatus,
        OrderItem
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session issuing and logout"),
        (name = "Users", description = "Accounts and roles"),
        (name = "Catalog", description = "Products and categories"),
        (name = "Cart", description = "Single cart per user"),
        (name = "Orders", description = "Checkout snapshots and payment status"),
        (name = "Sales", description = "Admin and seller totals"),
        (name = "Payments", description = "Payment gateway collaborator"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn scalar_docs<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
