use super::SeaOrmStorage;
use crate::entity::hackathons::Entity as Hackathons;
use crate::errors::{HackathonError, Result};
use crate::models::hackathons::entities::Hackathon;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取黑客松
    pub async fn get_hackathon_by_id_impl(&self, hackathon_id: i64) -> Result<Option<Hackathon>> {
        let result = Hackathons::find_by_id(hackathon_id)
            .one(&self.db)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询黑客松失败: {e}")))?;

        Ok(result.map(|m| m.into_hackathon()))
    }
}
