pub mod import;
pub mod list;
pub mod queue;
pub mod rate;
pub mod reset;
pub mod settings;
pub mod stats;
pub mod study;
pub mod toggle;
