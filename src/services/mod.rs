pub mod assignments;
pub mod evaluators;

pub use assignments::AssignmentService;
pub use evaluators::EvaluatorService;
