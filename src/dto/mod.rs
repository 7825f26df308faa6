pub mod auth;
pub mod cart;
pub mod catalog;
pub mod common;
pub mod orders;
pub mod payments;
pub mod sales;
pub mod users;
