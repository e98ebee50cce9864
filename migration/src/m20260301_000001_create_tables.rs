use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表（身份由外部认证服务签发，这里只保存资料与角色）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建黑客松表
        manager
            .create_table(
                Table::create()
                    .table(Hackathons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hackathons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hackathons::Name).string().not_null())
                    .col(
                        ColumnDef::new(Hackathons::OrganizerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Hackathons::RoundCount)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Hackathons::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Hackathons::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Hackathons::Table, Hackathons::OrganizerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评委表
        manager
            .create_table(
                Table::create()
                    .table(Evaluators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluators::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluators::HackathonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluators::UserId).big_integer().null())
                    .col(ColumnDef::new(Evaluators::Name).string().not_null())
                    .col(ColumnDef::new(Evaluators::Email).string().not_null())
                    .col(
                        ColumnDef::new(Evaluators::EvaluatorType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluators::Status).string().not_null())
                    .col(ColumnDef::new(Evaluators::SponsorCompany).string().null())
                    .col(
                        ColumnDef::new(Evaluators::CanJudgeSponsoredPs)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Evaluators::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluators::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluators::Table, Evaluators::HackathonId)
                            .to(Hackathons::Table, Hackathons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluators::Table, Evaluators::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作品提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::HackathonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::RoundIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(ColumnDef::new(Submissions::ProjectId).big_integer().null())
                    .col(ColumnDef::new(Submissions::PresentationUrl).string().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentVersion)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::HackathonId)
                            .to(Hackathons::Table, Hackathons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分表（评审子系统写入，这里只读）
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scores::SubmissionId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::EvaluatorId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::RoundIndex).integer().not_null())
                    .col(ColumnDef::new(Scores::Score).double().not_null())
                    .col(ColumnDef::new(Scores::Comment).text().null())
                    .col(ColumnDef::new(Scores::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scores::Table, Scores::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scores::Table, Scores::EvaluatorId)
                            .to(Evaluators::Table, Evaluators::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_evaluators_hackathon_email")
                    .table(Evaluators::Table)
                    .col(Evaluators::HackathonId)
                    .col(Evaluators::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_hackathon_round")
                    .table(Submissions::Table)
                    .col(Submissions::HackathonId)
                    .col(Submissions::RoundIndex)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scores_submission_round")
                    .table(Scores::Table)
                    .col(Scores::SubmissionId)
                    .col(Scores::RoundIndex)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hackathons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    Role,
    Status,
    DisplayName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Hackathons {
    #[sea_orm(iden = "hackathons")]
    Table,
    Id,
    Name,
    OrganizerId,
    RoundCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Evaluators {
    #[sea_orm(iden = "evaluators")]
    Table,
    Id,
    HackathonId,
    UserId,
    Name,
    Email,
    EvaluatorType,
    Status,
    SponsorCompany,
    CanJudgeSponsoredPs,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    HackathonId,
    RoundIndex,
    Status,
    ProjectId,
    PresentationUrl,
    SubmittedAt,
    AssignmentVersion,
}

#[derive(DeriveIden)]
enum Scores {
    #[sea_orm(iden = "scores")]
    Table,
    Id,
    SubmissionId,
    EvaluatorId,
    RoundIndex,
    Score,
    Comment,
    CreatedAt,
}
