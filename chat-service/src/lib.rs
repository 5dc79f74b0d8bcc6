//! chat-service: conversational text-processing front end.
//!
//! Accepts free text or a remote-resource reference (webpage, PDF, video
//! transcript), optionally augments it with a system instruction, forwards it
//! to an LLM completion endpoint, and returns the generated text. Maintains a
//! bounded, expiring conversational context per session.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
