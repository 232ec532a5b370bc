//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod product;
pub mod user;

pub use product::Entity as ProductEntity;
pub use user::Entity as UserEntity;
