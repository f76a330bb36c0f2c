pub mod levels;
pub mod phonetic;
pub mod segment;
pub mod settings;
pub mod unicode;
