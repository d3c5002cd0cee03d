//! Bridge between the egui thread and the tokio worker that talks HTTP.

pub mod commands;
pub mod runtime;
