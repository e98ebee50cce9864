use std::collections::HashMap;

use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssignmentMode;

fn default_judges_per_project() -> i32 {
    1
}

/// 批量分配请求（预览与提交共用）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct BulkAssignRequest {
    /// 选中的作品提交
    pub submission_ids: Vec<i64>,
    /// 选中的评委
    pub evaluator_ids: Vec<i64>,
    /// 手动模式下每位评委分配的数量，未设置视为 0
    #[serde(default)]
    pub assign_counts: HashMap<i64, i32>,
    #[serde(default)]
    pub assignment_mode: AssignmentMode,
    /// 是否为每个作品分配多位评委
    #[serde(default)]
    pub multiple_judges_mode: bool,
    #[serde(default = "default_judges_per_project")]
    pub judges_per_project: i32,
    #[serde(default)]
    pub judges_per_project_mode: AssignmentMode,
    /// 分配前随机打乱评委顺序
    #[serde(default)]
    pub shuffle: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let req: BulkAssignRequest =
            serde_json::from_str(r#"{"submission_ids":[1,2],"evaluator_ids":[9]}"#).unwrap();
        assert_eq!(req.assignment_mode, AssignmentMode::Equal);
        assert_eq!(req.judges_per_project_mode, AssignmentMode::Equal);
        assert_eq!(req.judges_per_project, 1);
        assert!(!req.multiple_judges_mode);
        assert!(req.assign_counts.is_empty());
    }

    #[test]
    fn test_assign_counts_accept_string_keys() {
        let req: BulkAssignRequest = serde_json::from_str(
            r#"{"submission_ids":[1],"evaluator_ids":[3,4],"assignment_mode":"manual","assign_counts":{"3":2,"4":1}}"#,
        )
        .unwrap();
        assert_eq!(req.assignment_mode, AssignmentMode::Manual);
        assert_eq!(req.assign_counts.get(&3), Some(&2));
        assert_eq!(req.assign_counts.get(&4), Some(&1));
    }
}
