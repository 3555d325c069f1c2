use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::admins::AdminEntity;

#[automock]
#[async_trait]
pub trait AdminRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<AdminEntity>>;
}
