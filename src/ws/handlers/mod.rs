pub mod room;
pub mod utils;

pub use room::room_ws_handler;
