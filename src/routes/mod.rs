pub mod assignments;

pub mod evaluators;

pub use assignments::configure_assignment_routes;
pub use evaluators::configure_evaluator_routes;
