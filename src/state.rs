use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    payments::PaymentsClient,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: AppConfig,
    pub payments: PaymentsClient,
}
