//! Shared transcript grammar utilities.
//!
//! This module holds the line grammar of exported WhatsApp transcripts and
//! the date/time token interpretation used by both the reconstructor and the
//! statistics passes.

pub mod whatsapp;

// Re-export commonly used items
pub use whatsapp::{DateOrder, HeaderMatch, match_header, parse_date, parse_hour, split_sender};
