mod get;
mod kick_votes;
mod public_index;
mod put;
mod scores;
mod streaks;

pub use get::*;
pub use kick_votes::*;
pub use public_index::*;
pub use put::*;
pub use scores::*;
pub use streaks::*;
