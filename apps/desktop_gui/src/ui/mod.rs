//! UI layer for the storefront window.

pub mod app;

pub use app::StorefrontApp;
