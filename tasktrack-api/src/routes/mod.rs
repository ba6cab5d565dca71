/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login endpoint
/// - `users`: User management and password endpoints
/// - `categories`: Category management endpoints
/// - `tasks`: Task lifecycle, editing, and history endpoints
/// - `reports`: Aggregate reporting endpoints

pub mod health;
pub mod auth;
pub mod users;
pub mod categories;
pub mod tasks;
pub mod reports;
