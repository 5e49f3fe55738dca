pub mod console;
pub mod progress;
