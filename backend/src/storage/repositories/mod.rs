pub mod cost_repository;

pub use cost_repository::CostRepository;
