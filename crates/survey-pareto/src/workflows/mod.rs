pub mod pareto;
pub mod sheets;
