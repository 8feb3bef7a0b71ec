pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod feed;
pub mod fetch;
pub mod jobs;
pub mod mutate;
pub mod normalize;
pub mod screens;

#[cfg(test)]
mod testing;
