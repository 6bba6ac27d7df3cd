pub mod customer_service;
pub mod event_service;
pub mod offer_service;
pub mod special_date_service;
pub mod spin_wheel_service;

pub use customer_service::CustomerService;
pub use event_service::EventService;
pub use offer_service::OfferService;
pub use special_date_service::SpecialDateService;
pub use spin_wheel_service::SpinWheelService;
