pub mod customer;
pub mod event;
pub mod offer;
pub mod special_date;
pub mod spin_wheel;
pub mod whatsapp;

pub use customer::customer_config;
pub use event::event_config;
pub use offer::offer_config;
pub use special_date::special_date_config;
pub use spin_wheel::spin_wheel_config;
pub use whatsapp::whatsapp_config;
