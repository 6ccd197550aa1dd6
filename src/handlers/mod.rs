// src/handlers/mod.rs

pub mod pages;
pub mod qr;
pub mod quiz;
pub mod stats;

/// Session-store key holding the typed `QuizSession` value.
pub(crate) const SESSION_KEY: &str = "quiz";

/// Session-store key holding one-shot `Feedback`, consumed on render.
pub(crate) const FEEDBACK_KEY: &str = "feedback";
