//! Test Module
//!
//! ## Test Categories
//! - `brain_tests`: keyword classification, question detection, fallback replies
//! - `engine_tests`: score extraction, summaries, chat orchestration with a mock model
//! - `integration_tests`: full flows through the Gemini client against a mock HTTP server
