//! Canvas 2D presentation
//!
//! The palette is compiled everywhere (its alert red is the debris color from
//! `consts`); drawing exists only in the browser build.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod palette;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
