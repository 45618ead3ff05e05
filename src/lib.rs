#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod analyzer;
pub mod api;
pub mod core;
pub mod error;
pub mod mapper;
pub mod prelude;
pub mod quantity;
pub mod statistics;
