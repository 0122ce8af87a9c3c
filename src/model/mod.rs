pub mod api;
pub mod app;
pub mod image;
pub mod manifest;
pub mod query;
pub mod session;
