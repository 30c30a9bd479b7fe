pub mod players;
pub mod room;
pub mod store;
pub mod turn;
