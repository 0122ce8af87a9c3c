pub use super::character::Entity as Character;
