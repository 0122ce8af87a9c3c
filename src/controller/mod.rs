pub mod characters;
pub mod health;
pub mod trade;
