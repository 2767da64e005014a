//! Unit tests for the endpoint module.
