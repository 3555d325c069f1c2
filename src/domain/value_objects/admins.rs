use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::admins::AdminEntity;

/// The signed-in staff member, attached to every guarded request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl AdminModel {
    pub fn from_entity(entity: AdminEntity, email: Option<String>) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email,
        }
    }
}
