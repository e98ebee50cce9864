use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评委类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluator.ts")]
pub enum EvaluatorType {
    Platform, // 平台评委
    Sponsor,  // 赞助商评委
    Hybrid,   // 混合评委
}

impl EvaluatorType {
    pub const PLATFORM: &'static str = "platform";
    pub const SPONSOR: &'static str = "sponsor";
    pub const HYBRID: &'static str = "hybrid";
}

impl<'de> Deserialize<'de> for EvaluatorType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的评委类型: '{s}'. 支持的类型: platform, sponsor, hybrid"
            ))
        })
    }
}

impl std::fmt::Display for EvaluatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluatorType::Platform => write!(f, "{}", EvaluatorType::PLATFORM),
            EvaluatorType::Sponsor => write!(f, "{}", EvaluatorType::SPONSOR),
            EvaluatorType::Hybrid => write!(f, "{}", EvaluatorType::HYBRID),
        }
    }
}

impl std::str::FromStr for EvaluatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EvaluatorType::PLATFORM => Ok(EvaluatorType::Platform),
            EvaluatorType::SPONSOR => Ok(EvaluatorType::Sponsor),
            EvaluatorType::HYBRID => Ok(EvaluatorType::Hybrid),
            _ => Err(format!("Invalid evaluator type: {s}")),
        }
    }
}

// 评委邀请状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluator.ts")]
pub enum EvaluatorStatus {
    Active,   // 已接受邀请
    Pending,  // 待回应
    Declined, // 已拒绝
}

impl<'de> Deserialize<'de> for EvaluatorStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的评委状态: '{s}'. 支持的状态: active, pending, declined"
            ))
        })
    }
}

impl std::fmt::Display for EvaluatorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluatorStatus::Active => write!(f, "active"),
            EvaluatorStatus::Pending => write!(f, "pending"),
            EvaluatorStatus::Declined => write!(f, "declined"),
        }
    }
}

impl std::str::FromStr for EvaluatorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EvaluatorStatus::Active),
            "pending" => Ok(EvaluatorStatus::Pending),
            "declined" => Ok(EvaluatorStatus::Declined),
            _ => Err(format!("Invalid evaluator status: {s}")),
        }
    }
}

// 评委实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluator.ts")]
pub struct Evaluator {
    pub id: i64,
    pub hackathon_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub evaluator_type: EvaluatorType,
    pub status: EvaluatorStatus,
    pub sponsor_company: Option<String>,
    pub can_judge_sponsored_ps: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Evaluator {
    pub fn is_active(&self) -> bool {
        self.status == EvaluatorStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_type_parsing() {
        assert_eq!(
            "sponsor".parse::<EvaluatorType>().unwrap(),
            EvaluatorType::Sponsor
        );
        assert!("judge".parse::<EvaluatorType>().is_err());
    }

    #[test]
    fn test_evaluator_status_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<EvaluatorStatus>("\"invited\"").unwrap_err();
        assert!(err.to_string().contains("active, pending, declined"));
        let ok: EvaluatorStatus = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(ok, EvaluatorStatus::Declined);
    }
}
