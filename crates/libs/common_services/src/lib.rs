#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod access;
pub mod api;
pub mod cloud;
pub mod database;
pub mod utils;
