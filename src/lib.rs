pub mod alphabet;
pub mod analysis;
pub mod breaker;
pub mod config;
pub mod error;
pub mod key;
pub mod scorer;
// cmd and reports are binary-only modules, declared in main.rs.
