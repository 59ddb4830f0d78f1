//! zreason - streaming reasoning coalescer.
//!
//! Turns the raw reasoning/thinking deltas of a model stream into
//! discrete, rate-limited UI messages: untitled prose streams live but
//! coalesced, titled blocks surface as a single synthetic tool-call
//! pair, and completion never duplicates content already streamed.

pub mod config;
pub mod events;
pub mod reasoning_processor;
pub mod title_parser;

pub use config::StreamConfig;
pub use events::UiMessage;
pub use reasoning_processor::{EmitCallback, ReasoningProcessor};
