//! Flow handlers, split by feature
//!
//! Each file extends [`crate::dispatch::Dispatcher`] with the handlers of
//! one conversation flow.

mod category;
mod expense;
mod start;
mod stats;
