#![warn(clippy::all, clippy::pedantic)]

pub mod session_tests;
