pub mod engine;
pub mod lifecycle;
pub mod reveal;
pub mod scoring;
pub mod similarity;
pub mod timer_watcher;
