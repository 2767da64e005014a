//! Listener implementations.

mod logging;
mod recording;

pub use logging::LoggingTestListener;
pub use recording::{RecordingTestListener, TestEvent};
