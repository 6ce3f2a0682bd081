pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
pub mod view;
