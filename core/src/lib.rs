pub mod api;
pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod model;
