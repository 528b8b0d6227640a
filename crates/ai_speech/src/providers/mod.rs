//! Speech provider implementations (adapters)

pub mod deepgram;
