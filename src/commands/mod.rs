//! CLI commands

pub mod clean;
pub mod generate;
pub mod list;
pub mod new;
pub mod routes;
pub mod show;
pub mod sitemap;
