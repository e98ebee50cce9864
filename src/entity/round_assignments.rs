//! 轮次分配实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "round_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub judge_assignment_id: i64,
    pub round_index: i32,
    pub max_submissions: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::judge_assignments::Entity",
        from = "Column::JudgeAssignmentId",
        to = "super::judge_assignments::Column::Id"
    )]
    JudgeAssignment,
    #[sea_orm(has_many = "super::round_assignment_submissions::Entity")]
    Submissions,
}

impl Related<super::judge_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JudgeAssignment.def()
    }
}

impl Related<super::round_assignment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
