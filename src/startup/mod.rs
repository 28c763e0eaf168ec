//! Startup logging for AgentGate

mod logger;

pub use logger::StartupLogger;
