//! Provider compilation: turning parsed provider definitions into
//! ready-to-match regex bundles.

pub mod compiler;

pub use compiler::{compile_providers, get_or_compile_providers, CompiledProvider, CompiledProviders};
