pub mod events;
pub mod fetch;
pub mod history;
pub(crate) mod job;
pub mod progress;
pub mod queue;
pub mod selector;
pub(crate) mod transfer;
pub mod url_parser;
