pub mod canned;
pub mod client;
mod html;
mod polish;
pub mod registry;
pub mod source;
pub mod ure;
