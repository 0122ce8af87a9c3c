pub mod archive;
pub mod character;
