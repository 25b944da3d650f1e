//! Light Em All (workspace facade crate).
//!
//! Re-exports the workspace crates under one path so the binary, benches and
//! integration tests can use `light_em_all::{core,input,term,types}`.

pub use light_em_all_core as core;
pub use light_em_all_input as input;
pub use light_em_all_term as term;
pub use light_em_all_types as types;
