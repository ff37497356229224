//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Transaction)
//! - Domain value objects (Direction, Amount, Description)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
