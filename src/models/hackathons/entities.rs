use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/hackathon.ts")]
pub struct Hackathon {
    // 唯一 ID
    pub id: i64,
    // 黑客松名称
    pub name: String,
    // 主办方用户 ID
    pub organizer_id: i64,
    // 评审轮次数量，轮次编号为 0..round_count
    pub round_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Hackathon {
    /// 轮次编号是否在该黑客松的范围内
    pub fn has_round(&self, round_index: i32) -> bool {
        round_index >= 0 && round_index < self.round_count
    }
}
