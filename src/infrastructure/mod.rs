// Delimited dataset file access
pub mod dataset;

// Seeded synthetic dataset for tests and demos
pub mod mock;
