use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::evaluators::entities::EvaluatorType;
use crate::models::users::entities::{User, UserRole};

/// 分配模式（评委数量分配 / 每个作品评委数）
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentMode {
    Manual, // 手动指定数量
    #[default]
    Equal, // 平均分配
}

/// 发起分配操作的用户，由已验证的请求身份构造后显式传入
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentContext {
    pub user_id: i64,
    pub role: UserRole,
}

impl From<&User> for AssignmentContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role.clone(),
        }
    }
}

/// 评委在某一轮的分配记录
#[derive(Debug, Clone, PartialEq)]
pub struct RoundAssignment {
    pub round_index: i32,
    pub assigned_submissions: BTreeSet<i64>,
    pub max_submissions: i32,
}

/// 评委在一场黑客松中的分配记录，按轮次排列
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeAssignment {
    pub id: i64,
    pub hackathon_id: i64,
    pub evaluator_id: i64,
    pub evaluator_type: EvaluatorType,
    pub rounds: Vec<RoundAssignment>,
}

impl JudgeAssignment {
    pub fn round(&self, round_index: i32) -> Option<&RoundAssignment> {
        self.rounds.iter().find(|r| r.round_index == round_index)
    }
}

/// 按评委类型分桶的分配记录
#[derive(Debug, Clone, Default)]
pub struct JudgeAssignmentBuckets {
    pub platform: Vec<JudgeAssignment>,
    pub sponsor: Vec<JudgeAssignment>,
    pub hybrid: Vec<JudgeAssignment>,
}

impl JudgeAssignmentBuckets {
    pub fn from_assignments(assignments: impl IntoIterator<Item = JudgeAssignment>) -> Self {
        let mut buckets = Self::default();
        for assignment in assignments {
            match assignment.evaluator_type {
                EvaluatorType::Platform => buckets.platform.push(assignment),
                EvaluatorType::Sponsor => buckets.sponsor.push(assignment),
                EvaluatorType::Hybrid => buckets.hybrid.push(assignment),
            }
        }
        buckets
    }

    /// 遍历三个桶中的全部分配记录
    pub fn iter(&self) -> impl Iterator<Item = &JudgeAssignment> {
        self.platform
            .iter()
            .chain(self.sponsor.iter())
            .chain(self.hybrid.iter())
    }
}

/// 单个作品的分配写入请求（由提交器逐个发送给存储层）
#[derive(Debug, Clone)]
pub struct BindingWrite {
    pub hackathon_id: i64,
    pub round_index: i32,
    pub submission_id: i64,
    /// 计划中的评委，按优先顺序排列
    pub evaluator_ids: Vec<i64>,
    /// 该作品在本轮的目标覆盖数
    pub target_coverage: usize,
    /// 新建轮次分配时使用的容量
    pub default_max_submissions: i32,
    pub assigned_by: i64,
}

/// 单个作品写入后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOutcome {
    /// 新绑定的评委
    Assigned(Vec<i64>),
    /// 覆盖数已达到目标，未做任何写入
    AlreadyCovered(usize),
    /// 读取之后版本号被其他会话修改，已回滚
    VersionConflict,
    /// 作品不存在或不再符合分配条件
    Ineligible(String),
}
