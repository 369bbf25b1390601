// File: brb-core/src/test_utils/mod.rs

pub mod recording;

pub use recording::RecordingWriter;
