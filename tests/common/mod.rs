#![allow(dead_code)]

pub mod harness;
pub mod http_client;

/// Devanagari sentences shared by the integration suites.
pub const HINDI_SENTENCE: &str = "यह एक परीक्षण है";
pub const HINDI_OTHER_SENTENCE: &str = "आज मौसम अच्छा है";
