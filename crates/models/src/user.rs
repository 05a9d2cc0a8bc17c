use sea_orm::{entity::prelude::*, DatabaseConnection, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub pass_hash: Vec<u8>,
    pub is_admin: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .finish_non_exhaustive()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a user; `is_admin` takes the column default.
pub async fn create(db: &DatabaseConnection, email: &str, pass_hash: Vec<u8>) -> Result<Model, ModelError> {
    if email.trim().is_empty() { return Err(ModelError::Validation("email required".into())); }
    if pass_hash.is_empty() { return Err(ModelError::Validation("password hash required".into())); }
    let am = ActiveModel {
        email: Set(email.to_string()),
        pass_hash: Set(pass_hash),
        ..Default::default()
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

/// Fetch only the admin flag; `None` when no user has this id.
pub async fn admin_flag(db: &DatabaseConnection, id: i64) -> Result<Option<bool>, ModelError> {
    Entity::find_by_id(id)
        .select_only()
        .column(Column::IsAdmin)
        .into_tuple::<bool>()
        .one(db)
        .await
        .map_err(ModelError::from_db)
}
