//! 评委实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluators")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub hackathon_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub evaluator_type: String,
    pub status: String,
    pub sponsor_company: Option<String>,
    pub can_judge_sponsored_ps: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hackathons::Entity",
        from = "Column::HackathonId",
        to = "super::hackathons::Column::Id"
    )]
    Hackathon,
    #[sea_orm(has_many = "super::judge_assignments::Entity")]
    JudgeAssignments,
}

impl Related<super::hackathons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hackathon.def()
    }
}

impl Related<super::judge_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JudgeAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型
    ///
    /// 未知的类型按平台评委处理，未知的状态按待回应处理，不会被当作可分配的评委。
    pub fn into_evaluator(self) -> crate::models::evaluators::entities::Evaluator {
        use crate::models::evaluators::entities::{Evaluator, EvaluatorStatus, EvaluatorType};

        Evaluator {
            id: self.id,
            hackathon_id: self.hackathon_id,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            evaluator_type: self
                .evaluator_type
                .parse::<EvaluatorType>()
                .unwrap_or(EvaluatorType::Platform),
            status: self
                .status
                .parse::<EvaluatorStatus>()
                .unwrap_or(EvaluatorStatus::Pending),
            sponsor_company: self.sponsor_company,
            can_judge_sponsored_ps: self.can_judge_sponsored_ps,
            created_at: super::timestamp_to_utc(self.created_at),
            updated_at: super::timestamp_to_utc(self.updated_at),
        }
    }
}
