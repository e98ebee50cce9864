//! 存储层测试夹具：内存 SQLite 与种子数据

use std::sync::atomic::{AtomicI64, Ordering};

use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};

use super::SeaOrmStorage;
use crate::entity::{evaluators, hackathons, scores, submissions, users};

static SEQ: AtomicI64 = AtomicI64::new(1);

fn next_seq() -> i64 {
    SEQ.fetch_add(1, Ordering::Relaxed)
}

/// 单连接的内存数据库，保证所有查询看到同一份数据
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory sqlite");
    SeaOrmStorage::from_connection(db)
        .await
        .expect("failed to run migrations")
}

pub(crate) async fn seed_user(storage: &SeaOrmStorage, role: &str) -> i64 {
    let seq = next_seq();
    let now = chrono::Utc::now().timestamp();
    users::ActiveModel {
        username: Set(format!("user{seq}")),
        email: Set(format!("user{seq}@hackjudge.dev")),
        role: Set(role.to_string()),
        status: Set("active".to_string()),
        display_name: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("failed to seed user")
    .id
}

pub(crate) async fn seed_hackathon(storage: &SeaOrmStorage, round_count: i32) -> i64 {
    let organizer = seed_user(storage, "organizer").await;
    let now = chrono::Utc::now().timestamp();
    hackathons::ActiveModel {
        name: Set(format!("hackathon-{}", next_seq())),
        organizer_id: Set(organizer),
        round_count: Set(round_count),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("failed to seed hackathon")
    .id
}

pub(crate) async fn seed_evaluator(
    storage: &SeaOrmStorage,
    hackathon_id: i64,
    email: &str,
    evaluator_type: &str,
    status: &str,
) -> i64 {
    let now = chrono::Utc::now().timestamp();
    evaluators::ActiveModel {
        hackathon_id: Set(hackathon_id),
        user_id: Set(None),
        name: Set(email.split('@').next().unwrap_or(email).to_string()),
        email: Set(email.to_string()),
        evaluator_type: Set(evaluator_type.to_string()),
        status: Set(status.to_string()),
        sponsor_company: Set(None),
        can_judge_sponsored_ps: Set(evaluator_type != "platform"),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("failed to seed evaluator")
    .id
}

pub(crate) async fn seed_submission(
    storage: &SeaOrmStorage,
    hackathon_id: i64,
    round_index: i32,
    status: &str,
) -> i64 {
    let seq = next_seq();
    submissions::ActiveModel {
        hackathon_id: Set(hackathon_id),
        round_index: Set(round_index),
        status: Set(status.to_string()),
        project_id: Set(Some(seq)),
        presentation_url: Set(None),
        // 按种子顺序递增，保证列表顺序稳定
        submitted_at: Set(1_700_000_000 + seq),
        assignment_version: Set(0),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("failed to seed submission")
    .id
}

pub(crate) async fn seed_score(
    storage: &SeaOrmStorage,
    submission_id: i64,
    evaluator_id: i64,
    round_index: i32,
) {
    scores::ActiveModel {
        submission_id: Set(submission_id),
        evaluator_id: Set(evaluator_id),
        round_index: Set(round_index),
        score: Set(8.5),
        comment: Set(None),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .expect("failed to seed score");
}
