pub mod document_selector;
pub mod file_hash;

pub use document_selector::DocumentSelector;
pub use file_hash::FileHash;
