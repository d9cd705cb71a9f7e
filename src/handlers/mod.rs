pub mod auth;
pub mod perfumes;
