//! Terminal renderings of the pages.

pub mod text;
