pub mod product;
pub mod trend;
