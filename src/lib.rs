//! Client for the Cloudflare D1 HTTP query API.
//!
//! [`client::D1Client`] posts one SQL statement per call and unwraps the
//! response envelope into a [`result::ResultSet`]. The remaining modules
//! back the `d1query` command-line tool.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod format_detect;
pub mod masking;
pub mod output;
pub mod params;
pub mod result;
pub mod verbose;

pub use client::{Credentials, D1Client};
pub use error::D1Error;
pub use result::{ResultSet, Row};
