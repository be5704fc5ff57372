//! Unit tests for lane-ordered tasks.
