//! Integration tests for skill-activation

mod activation_tests;
mod rules_file_tests;
