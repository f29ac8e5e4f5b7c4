// ABOUTME: Library crate for vendorbox exposing the API client, wizard and TUI for testing and external use

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
