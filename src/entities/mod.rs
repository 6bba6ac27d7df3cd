pub mod customer_profiles;
pub mod customers;
pub mod event_bookings;
pub mod events;
pub mod game_sessions;
pub mod offer_usages;
pub mod offers;
pub mod prizes;
pub mod special_dates;
pub mod spin_records;

pub use customer_profiles as customer_profile_entity;
pub use customers as customer_entity;
pub use event_bookings as event_booking_entity;
pub use events as event_entity;
pub use game_sessions as game_session_entity;
pub use offer_usages as offer_usage_entity;
pub use offers as offer_entity;
pub use prizes as prize_entity;
pub use special_dates as special_date_entity;
pub use spin_records as spin_record_entity;
