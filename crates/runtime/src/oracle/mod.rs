//! Decision oracle implementations.
//!
//! [`OllamaOracle`] forwards situational prompts to an Ollama-compatible
//! generate endpoint and decodes the JSON verdicts. [`HeuristicOracle`]
//! answers locally from fixed engagement rules and needs no network.
mod config;
mod heuristic;
mod ollama;
mod prompt;

pub use config::OracleConfig;
pub use heuristic::HeuristicOracle;
pub use ollama::OllamaOracle;
