//! 评委分配实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "judge_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub hackathon_id: i64,
    pub evaluator_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluators::Entity",
        from = "Column::EvaluatorId",
        to = "super::evaluators::Column::Id"
    )]
    Evaluator,
    #[sea_orm(has_many = "super::round_assignments::Entity")]
    RoundAssignments,
}

impl Related<super::evaluators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluator.def()
    }
}

impl Related<super::round_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
