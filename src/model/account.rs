use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AccountDto {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Request body for creating an account
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateAccountDto {
    pub name: String,
}

impl From<entity::account::Model> for AccountDto {
    fn from(account: entity::account::Model) -> Self {
        Self {
            id: account.id,
            name: account.name,
            created_at: account.created_at,
        }
    }
}
