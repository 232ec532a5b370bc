//! Product database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Product, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(1000))")]
    pub description: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub category: String,
    pub price: i32,
    pub user_id: i32,
    pub updated_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owner; removing the user removes their products
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Join the row with its loaded owner.
    pub fn into_domain(self, owner: User) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            owner,
            updated_at: self.updated_at,
            created_at: self.created_at,
        }
    }
}
