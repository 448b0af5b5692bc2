//! Output generation: reports, cover letters and saved artifacts

pub mod artifacts;
pub mod cover_letter;
pub mod formatter;
