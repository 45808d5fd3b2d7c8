pub mod auth;
pub mod crafts;
pub mod health;
