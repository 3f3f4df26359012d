//! HTTP request handlers

pub mod notify;
