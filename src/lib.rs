pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod media;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
