// Terminal rendering of analysis results.

pub mod terminal;

pub use terminal::truncate_chars;
