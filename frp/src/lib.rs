#![warn(clippy::pedantic)]

//! Convenient and full-featured push-pull FRP signals for Rust.
//!
//! External code assigns into an [`Input`], which fans a [`Transaction`]
//! through every observer; [`Signal`] operators translate, suppress, defer or
//! aggregate those transactions and re-emit to their own observers;
//! [`Output`]/[`WillOutput`]/[`Receiver`] leaves invoke plain callbacks.
//! [`frp_core`] supplies the observer-set, transaction and pull-value
//! primitives this crate builds its operator set on top of.

mod boolean;
mod computed_signal;
mod const_signal;
mod input;
mod link;
mod never;
mod operators;
mod receiver;
mod signal;
mod sugar;

pub use frp_core::{Clock, Scheduler, TimerHandle, Transaction};

pub use boolean::{and, is_nil, not, not_nil, or};
pub use computed_signal::computed;
pub use const_signal::constant;
pub use input::Input;
pub use never::never;
pub use operators::combine::{new2 as combine2, new3 as combine3, new4 as combine4, new5 as combine5, new6 as combine6};
pub use operators::union::new as union;
pub use receiver::{Output, Receiver, WillOutput};
pub use signal::Signal;
