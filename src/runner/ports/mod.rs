//! Runner ports.

mod listener;

pub use listener::TestListener;
