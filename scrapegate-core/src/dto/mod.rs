//! Data Transfer Objects
//!
//! Wire representations returned by the scrape endpoint.

pub mod scrape;
