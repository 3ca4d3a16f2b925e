// Presentation layer - Render-facing views
pub mod views;
