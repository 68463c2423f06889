pub mod alien;
pub mod language;
pub mod pool;
pub mod words;
