//! 作品提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub hackathon_id: i64,
    pub round_index: i32,
    pub status: String,
    pub project_id: Option<i64>,
    pub presentation_url: Option<String>,
    pub submitted_at: i64,
    /// 分配版本号，每次新增评委时递增
    pub assignment_version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hackathons::Entity",
        from = "Column::HackathonId",
        to = "super::hackathons::Column::Id"
    )]
    Hackathon,
    #[sea_orm(has_many = "super::scores::Entity")]
    Scores,
}

impl Related<super::hackathons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hackathon.def()
    }
}

impl Related<super::scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        crate::models::submissions::entities::Submission {
            id: self.id,
            hackathon_id: self.hackathon_id,
            round_index: self.round_index,
            status: self.status,
            project_id: self.project_id,
            presentation_url: self.presentation_url,
            submitted_at: super::timestamp_to_utc(self.submitted_at),
        }
    }
}
