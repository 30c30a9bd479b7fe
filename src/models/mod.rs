pub mod messages;
pub mod redis;
pub mod room;
pub mod word_catalog;
