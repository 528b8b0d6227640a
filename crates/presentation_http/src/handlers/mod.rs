//! HTTP request handlers

pub mod chat;
pub mod health;
pub mod speech;
pub mod stream;
