use std::collections::{HashMap, HashSet};

use serde::Serialize;
use ts_rs::TS;

use super::entities::AssignmentMode;
use crate::models::evaluators::entities::EvaluatorType;
use crate::models::submissions::entities::SubmissionLifecycle;

/// 计划中单个评委的分配
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct PlannedEvaluator {
    pub evaluator_id: i64,
    pub evaluator_name: String,
    pub evaluator_email: String,
    /// 本次分配的名额
    pub max_submissions: i32,
    /// 当前轮次剩余容量
    pub round_capacity: i32,
    pub assigned_submission_ids: Vec<i64>,
}

/// 单个作品绑定的评委
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionBinding {
    pub submission_id: i64,
    pub evaluator_ids: Vec<i64>,
}

/// 分配计划（只在内存中存在，提交前可预览）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentPlan {
    pub hackathon_id: i64,
    pub round_index: i32,
    pub assignment_mode: AssignmentMode,
    pub multiple_judges_mode: bool,
    pub judges_per_project: i32,
    pub judges_per_project_mode: AssignmentMode,
    /// 原始选择的数量（去重后）
    pub selected_count: i32,
    /// 收窄后的待分配作品
    pub submission_ids: Vec<i64>,
    /// 已被其他评委覆盖而被剔除的作品
    pub excluded_submission_ids: Vec<i64>,
    pub evaluator_assignments: Vec<PlannedEvaluator>,
    pub bindings: Vec<SubmissionBinding>,
    pub warnings: Vec<String>,
}

/// 概览中的单个作品
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionOverviewItem {
    pub submission_id: i64,
    pub status: String,
    pub project_id: Option<i64>,
    pub presentation_url: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// 本轮覆盖该作品的评委数量
    pub coverage: i32,
    pub evaluator_ids: Vec<i64>,
    pub state: SubmissionLifecycle,
}

/// 评委当前负载
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct JudgeLoad {
    pub evaluator_id: i64,
    pub name: String,
    pub email: String,
    pub evaluator_type: EvaluatorType,
    pub current_load: i32,
    pub max_submissions: i32,
    pub remaining_capacity: i32,
}

/// 分配概览，每次读取时重新计算
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentOverview {
    pub round_index: i32,
    pub total_eligible: i32,
    pub unassigned_submissions: Vec<SubmissionOverviewItem>,
    pub assigned_submissions: Vec<SubmissionOverviewItem>,
    pub judges: Vec<JudgeLoad>,
}

impl AssignmentOverview {
    /// 未分配作品的 ID 集合，每个周期构建一次
    pub fn unassigned_ids(&self) -> HashSet<i64> {
        self.unassigned_submissions
            .iter()
            .map(|s| s.submission_id)
            .collect()
    }

    pub fn assigned_ids(&self) -> HashSet<i64> {
        self.assigned_submissions
            .iter()
            .map(|s| s.submission_id)
            .collect()
    }

    /// evaluator_id -> 当前负载
    pub fn judges_by_id(&self) -> HashMap<i64, &JudgeLoad> {
        self.judges.iter().map(|j| (j.evaluator_id, j)).collect()
    }
}

/// 单个作品的提交结果
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum CommitItemStatus {
    Assigned, // 新增了评委
    Skipped,  // 已达到覆盖目标
    Conflict, // 多次重试后仍然版本冲突
    Failed,   // 其他错误
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionCommitResult {
    pub submission_id: i64,
    pub status: CommitItemStatus,
    /// 本次新增的评委
    pub evaluator_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct EvaluatorCommitResult {
    pub evaluator_id: i64,
    pub assigned_count: i32,
}

/// 批量分配结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CommitResult {
    pub commit_id: String,
    /// 本次新分配的作品数量
    pub assigned_submissions: i32,
    pub results: Vec<SubmissionCommitResult>,
    pub per_evaluator: Vec<EvaluatorCommitResult>,
    /// 提交后重新计算的概览；写入已经完成但重新读取失败时为空
    pub overview: Option<AssignmentOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_error: Option<String>,
}
