pub mod auth;
pub mod aws;
pub mod config;
pub mod http;
pub mod repositories;
