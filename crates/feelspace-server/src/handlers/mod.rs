//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod audit;
pub mod emotions;
pub mod games;
pub mod health;
pub mod wallets;

// Re-export all handlers for use in router
pub use analytics::*;
pub use audit::*;
pub use emotions::*;
pub use games::*;
pub use health::*;
pub use wallets::*;

use axum::extract::FromRequest;

use crate::AppError;

/// `Json` extractor whose rejections render as [`AppError`] bodies
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
