//! Scrapegate Core
//!
//! Core types shared by the scrapegate services.
//!
//! This crate contains:
//! - Domain types: scrape requests, run identities and artifact names, log entries
//! - DTOs: the wire shape of the scrape endpoint's responses

pub mod domain;
pub mod dto;
