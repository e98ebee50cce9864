use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_tables::{Evaluators, Hackathons, Submissions};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 评委分配表（每个评委在每场黑客松一条） ====================
        manager
            .create_table(
                Table::create()
                    .table(JudgeAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JudgeAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JudgeAssignments::HackathonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JudgeAssignments::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JudgeAssignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JudgeAssignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(JudgeAssignments::Table, JudgeAssignments::HackathonId)
                            .to(Hackathons::Table, Hackathons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(JudgeAssignments::Table, JudgeAssignments::EvaluatorId)
                            .to(Evaluators::Table, Evaluators::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 轮次分配表 ====================
        manager
            .create_table(
                Table::create()
                    .table(RoundAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignments::JudgeAssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignments::RoundIndex)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignments::MaxSubmissions)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RoundAssignments::Table, RoundAssignments::JudgeAssignmentId)
                            .to(JudgeAssignments::Table, JudgeAssignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 轮次分配的作品集合 ====================
        manager
            .create_table(
                Table::create()
                    .table(RoundAssignmentSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundAssignmentSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignmentSubmissions::RoundAssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignmentSubmissions::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignmentSubmissions::AssignedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundAssignmentSubmissions::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                RoundAssignmentSubmissions::Table,
                                RoundAssignmentSubmissions::RoundAssignmentId,
                            )
                            .to(RoundAssignments::Table, RoundAssignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                RoundAssignmentSubmissions::Table,
                                RoundAssignmentSubmissions::SubmissionId,
                            )
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束：同一评委同一轮次同一作品只出现一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_judge_assignments_hackathon_evaluator")
                    .table(JudgeAssignments::Table)
                    .col(JudgeAssignments::HackathonId)
                    .col(JudgeAssignments::EvaluatorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_round_assignments_judge_round")
                    .table(RoundAssignments::Table)
                    .col(RoundAssignments::JudgeAssignmentId)
                    .col(RoundAssignments::RoundIndex)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_round_assignment_submissions_unique")
                    .table(RoundAssignmentSubmissions::Table)
                    .col(RoundAssignmentSubmissions::RoundAssignmentId)
                    .col(RoundAssignmentSubmissions::SubmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_round_assignment_submissions_submission")
                    .table(RoundAssignmentSubmissions::Table)
                    .col(RoundAssignmentSubmissions::SubmissionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(RoundAssignmentSubmissions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(RoundAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JudgeAssignments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum JudgeAssignments {
    #[sea_orm(iden = "judge_assignments")]
    Table,
    Id,
    HackathonId,
    EvaluatorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RoundAssignments {
    #[sea_orm(iden = "round_assignments")]
    Table,
    Id,
    JudgeAssignmentId,
    RoundIndex,
    MaxSubmissions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RoundAssignmentSubmissions {
    #[sea_orm(iden = "round_assignment_submissions")]
    Table,
    Id,
    RoundAssignmentId,
    SubmissionId,
    AssignedBy,
    AssignedAt,
}
