mod canvas;
mod drawers;
mod guessers;
mod reveal;
mod timers;
mod word;

pub use canvas::*;
pub use drawers::*;
pub use guessers::*;
pub use reveal::*;
pub use timers::*;
pub use word::*;
