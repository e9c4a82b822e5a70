#[path = "scenario/generation.rs"]
mod generation;

#[path = "scenario/persistence.rs"]
mod persistence;
