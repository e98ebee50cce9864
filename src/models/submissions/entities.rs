use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 可参与评委分配的提交状态（比较时忽略大小写）
pub const SUBMITTED_STATUS: &str = "submitted";

/// 作品提交
///
/// `status` 是工作流自由文本，只有等于 "submitted" 的提交才会进入分配流程。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub hackathon_id: i64,
    pub round_index: i32,
    pub status: String,
    // 关联的项目，或者独立的演示文稿
    pub project_id: Option<i64>,
    pub presentation_url: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        self.status.eq_ignore_ascii_case(SUBMITTED_STATUS)
    }

    /// 是否可以在指定轮次参与分配
    pub fn is_eligible_for_round(&self, round_index: i32) -> bool {
        self.round_index == round_index && self.is_submitted()
    }
}

/// 单个提交在某一轮的评审生命周期
///
/// Unsubmitted -> Submitted -> Assigned -> Evaluated，不存在从 Assigned 回退的转换。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionLifecycle {
    Unsubmitted,
    Submitted,
    Assigned,
    Evaluated,
}

impl SubmissionLifecycle {
    pub fn derive(submission: &Submission, coverage: usize, has_score: bool) -> Self {
        if !submission.is_submitted() {
            SubmissionLifecycle::Unsubmitted
        } else if coverage == 0 {
            SubmissionLifecycle::Submitted
        } else if has_score {
            SubmissionLifecycle::Evaluated
        } else {
            SubmissionLifecycle::Assigned
        }
    }
}
