/// Application layer - Use cases, DTOs and read models
///
/// Orchestrates the license resolution domain and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod use_cases;
