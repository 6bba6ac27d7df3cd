//! 需要真实 Postgres 的并发行为测试。
//! 设置 DATABASE_URL 后运行; 未设置时所有用例直接跳过。

use chrono::{Duration, NaiveDate, Utc};
use hotel_crm_backend::entities::game_session_entity as sessions;
use hotel_crm_backend::error::AppError;
use hotel_crm_backend::models::{
    BookEventRequest, ClaimRequest, CreateCustomerRequest, CreateEventRequest, EventType,
};
use hotel_crm_backend::services::{CustomerService, EventService, SpinWheelService};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

async fn connect() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = Database::connect(url).await.expect("database connection");
    Migrator::up(&pool, None).await.expect("migrations");
    Some(pool)
}

/// 每次运行生成互不冲突的手机号 (phone 列唯一)
fn unique_phone() -> String {
    let digits = Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("+52{:010}", digits)
}

async fn seed_customer(pool: &DatabaseConnection, name: &str) -> Uuid {
    let service = CustomerService::new(pool.clone());
    let customer = service
        .create_customer(CreateCustomerRequest {
            name: name.to_string(),
            email: None,
            phone: unique_phone(),
            birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        })
        .await
        .expect("seed customer");
    customer.id
}

/// 同一新客户的两次并发抽奖: 两次都必须成功,
/// is_first_play 恰好一个为 true, 且只落一条会话。
#[tokio::test]
async fn concurrent_first_plays_share_one_session() {
    let Some(pool) = connect().await else { return };
    let wheel = SpinWheelService::new(pool.clone());
    let customer_id = seed_customer(&pool, "Concurrent Player").await;

    let (a, b) = tokio::join!(wheel.play(customer_id), wheel.play(customer_id));
    let a = a.expect("first play");
    let b = b.expect("second play");

    assert_eq!(
        usize::from(a.is_first_play) + usize::from(b.is_first_play),
        1
    );

    let session_count = sessions::Entity::find()
        .filter(sessions::Column::CustomerId.eq(customer_id))
        .count(&pool)
        .await
        .expect("session count");
    assert_eq!(session_count, 1);
}

/// 同一条记录并发兑奖: 恰好一个成功, 另一个拿到 AlreadyClaimed。
#[tokio::test]
async fn concurrent_claims_allow_exactly_one_winner() {
    let Some(pool) = connect().await else { return };
    let wheel = SpinWheelService::new(pool.clone());
    let customer_id = seed_customer(&pool, "Double Claimer").await;

    let result = wheel.play(customer_id).await.expect("play");
    let (c1, c2) = tokio::join!(
        wheel.claim(
            result.record_id,
            ClaimRequest {
                notes: Some("front desk".to_string()),
            },
        ),
        wheel.claim(
            result.record_id,
            ClaimRequest {
                notes: Some("bar".to_string()),
            },
        ),
    );

    let outcomes = [c1, c2];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::AlreadyClaimed(_))))
    );

    let record = outcomes
        .into_iter()
        .find_map(|r| r.ok())
        .expect("winning claim");
    assert!(record.claimed);
    assert!(record.claimed_at.is_some());
}

/// 同一预订并发取消: 两次都幂等成功, 名额只释放一次。
#[tokio::test]
async fn concurrent_cancels_release_capacity_once() {
    let Some(pool) = connect().await else { return };
    let events = EventService::new(pool.clone());
    let customer_id = seed_customer(&pool, "Event Guest").await;

    let event = events
        .create_event(CreateEventRequest {
            title: format!("Wine Tasting {}", Uuid::new_v4()),
            description: "An evening of regional wines".to_string(),
            event_type: EventType::Party,
            start_date: Utc::now() + Duration::days(7),
            end_date: Utc::now() + Duration::days(7) + Duration::hours(4),
            capacity: 10,
            price_cents: 5000,
        })
        .await
        .expect("create event");

    let booking = events
        .book_event(
            event.id,
            BookEventRequest {
                customer_id,
                number_of_guests: 3,
                notes: None,
            },
        )
        .await
        .expect("book event");

    let (r1, r2) = tokio::join!(
        events.cancel_booking(booking.id),
        events.cancel_booking(booking.id)
    );
    r1.expect("first cancel");
    r2.expect("second cancel");

    let after = events.get_event(event.id).await.expect("reload event");
    assert_eq!(after.current_bookings, 0);
}
