// Test module organization for user_tokens
// This module is only compiled during testing via #[cfg(test)] in user_tokens.rs

// Import everything from parent module (user_tokens)
use crate::user_tokens::*;
use crate::user::User;

// Test submodules - each contains related tests
mod basic_tests;
mod edge_cases;
