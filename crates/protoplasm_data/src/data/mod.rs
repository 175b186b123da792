//! Core data structures for the Protoplasm simulation.

pub mod budget;
pub mod cell;
pub mod colony;
pub mod compound;
