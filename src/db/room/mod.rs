mod delete;
mod get;
mod patch;
mod post;

pub use delete::*;
pub use get::*;
pub use patch::*;
pub use post::*;
