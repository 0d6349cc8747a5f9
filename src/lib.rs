#[cfg(not(target_arch = "wasm32"))]
pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
pub mod scroll;
pub mod sections;
