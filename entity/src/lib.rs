pub mod character;
pub mod prelude;
