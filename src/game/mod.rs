//! Game world and simulation
//!
//! Entities, components, event queues and the per-frame tick.

pub mod component;
pub mod components;
pub mod entity;
pub mod event;
pub mod sim;
pub mod world;

pub use entity::Entity;
pub use event::Events;
pub use sim::GameState;
pub use world::World;
