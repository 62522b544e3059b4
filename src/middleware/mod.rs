/*
 * Responsibility
 * - Public entry points of the middleware layers (each module exposes `apply`)
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
