//! Local Library: a server-rendered catalog of books, authors, genres, and
//! book copies backed by SQLite.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;
pub mod views;
