#![warn(clippy::pedantic)]

//! Low-level primitives for building a single-threaded, push–pull FRP signal graph.
//!
//! This crate has no notion of operators: it only provides the observer-set
//! bookkeeping ([`KeyedSet`]), the wire format between graph nodes
//! ([`Transaction`] for push, [`LatestValue`] for pull), the [`SignalNode`]
//! trait every node (leaf or operator) implements, and the [`Clock`]/[`Scheduler`]
//! traits `Throttle` consumes from the `frp` crate.

mod keyed_set;
mod latest_value;
mod scheduler;
mod signal_node;
mod subscription;
mod transaction;

pub use keyed_set::KeyedSet;
pub use latest_value::LatestValue;
pub use scheduler::{Clock, Scheduler, TimerHandle};
pub use signal_node::{DelegateSignalCore, SignalCore, SignalNode};
pub use subscription::Subscription;
pub use transaction::Transaction;
