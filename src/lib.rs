pub use stencil_core::*;
