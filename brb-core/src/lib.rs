// src/lib.rs

pub mod app;
pub mod config;
pub mod countdown;
pub mod duration;
pub mod http;
pub mod platforms;
pub mod template;
pub mod terminal;
pub mod test_utils;

pub use brb_common::error::Error;
pub use brb_common::models::{FollowerCounts, Output, Platform};
pub use http::{DefaultHttpClient, HttpClient};
