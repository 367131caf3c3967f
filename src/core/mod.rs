// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use html::{HtmlPage, PageDocument};
pub use net::Renderer;
