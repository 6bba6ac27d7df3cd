use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{game_session_entity, prize_entity, spin_record_entity};

/// 奖品响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub weight: i32,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            description: m.description,
            icon: m.icon,
            weight: m.weight,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePrizeRequest {
    pub name: String,
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    pub weight: i32,
}

fn default_icon() -> String {
    "🎁".to_string()
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub weight: Option<i32>,
    pub is_active: Option<bool>,
}

/// 抽奖请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlayRequest {
    pub customer_id: Uuid,
}

/// 抽中的奖品, id 为空表示兜底奖 (未入奖品表)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WonPrize {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<prize_entity::Model> for WonPrize {
    fn from(m: prize_entity::Model) -> Self {
        WonPrize {
            id: Some(m.id),
            name: m.name,
            description: m.description,
            icon: m.icon,
        }
    }
}

/// 抽奖结果响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayResultResponse {
    pub record_id: Uuid,
    pub prize: WonPrize,
    pub customer_name: String,
    pub played_at: DateTime<Utc>,
    pub is_first_play: bool,
}

/// 兑奖请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClaimRequest {
    pub notes: Option<String>,
}

/// 抽奖记录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinRecordResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub prize_id: Option<Uuid>,
    pub prize_name: String,
    pub prize_icon: String,
    pub played_at: DateTime<Utc>,
    pub claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<spin_record_entity::Model> for SpinRecordResponse {
    fn from(m: spin_record_entity::Model) -> Self {
        SpinRecordResponse {
            id: m.id,
            customer_id: m.customer_id,
            prize_id: m.prize_id,
            prize_name: m.prize_name,
            prize_icon: m.prize_icon,
            played_at: m.played_at,
            claimed: m.claimed,
            claimed_at: m.claimed_at,
            notes: m.notes,
        }
    }
}

/// 抽奖记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SpinRecordQuery {
    pub customer_id: Option<Uuid>,
    pub claimed: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// 游戏会话响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameSessionResponse {
    pub customer_id: Uuid,
    pub has_played: bool,
    pub first_play_at: Option<DateTime<Utc>>,
}

impl From<game_session_entity::Model> for GameSessionResponse {
    fn from(m: game_session_entity::Model) -> Self {
        GameSessionResponse {
            customer_id: m.customer_id,
            has_played: m.has_played,
            first_play_at: m.first_play_at,
        }
    }
}

/// 转盘统计
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinStatsResponse {
    pub total_plays: i64,
    pub claimed_prizes: i64,
    pub unclaimed_prizes: i64,
    /// 奖品名称 -> 抽中次数
    pub prize_distribution: HashMap<String, i64>,
}

/// 抽奖记录分页响应
pub type SpinRecordPageResponse = crate::models::PaginatedResponse<SpinRecordResponse>;
