//! Theme module - design tokens and static assets

mod assets;
mod palette;

pub use assets::copy_static;
pub use palette::Palette;
