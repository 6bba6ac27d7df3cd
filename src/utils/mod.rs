pub mod phone;

pub use phone::*;
