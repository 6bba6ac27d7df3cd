pub mod common;
pub mod customer;
pub mod event;
pub mod offer;
pub mod pagination;
pub mod special_date;
pub mod spin_wheel;
pub mod whatsapp;

pub use common::*;
pub use customer::*;
pub use event::*;
pub use offer::*;
pub use pagination::*;
pub use special_date::*;
pub use spin_wheel::*;
pub use whatsapp::*;
