// Domain layer - Widget models and containers
pub mod collection;
pub mod registry;
pub mod widget;
