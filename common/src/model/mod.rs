pub mod banner;
pub mod catalog;
pub mod channel;
