//! Raw text extraction from resume and job description files

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;
