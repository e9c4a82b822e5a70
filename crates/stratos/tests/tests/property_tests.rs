#[path = "property/score_bounds.rs"]
mod score_bounds;

#[path = "property/crossover_laws.rs"]
mod crossover_laws;

#[path = "property/mutation_laws.rs"]
mod mutation_laws;

#[path = "property/population_size.rs"]
mod population_size;
