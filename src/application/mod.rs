// Application layer - Polling engine and dashboard assembly
pub mod controller;
pub mod dashboard;
pub mod snapshot;
