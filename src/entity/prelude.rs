//! 预导入模块，方便使用

pub use super::evaluators::{
    ActiveModel as EvaluatorActiveModel, Entity as Evaluators, Model as EvaluatorModel,
};
pub use super::hackathons::{
    ActiveModel as HackathonActiveModel, Entity as Hackathons, Model as HackathonModel,
};
pub use super::judge_assignments::{
    ActiveModel as JudgeAssignmentActiveModel, Entity as JudgeAssignments,
    Model as JudgeAssignmentModel,
};
pub use super::round_assignment_submissions::{
    ActiveModel as RoundAssignmentSubmissionActiveModel, Entity as RoundAssignmentSubmissions,
    Model as RoundAssignmentSubmissionModel,
};
pub use super::round_assignments::{
    ActiveModel as RoundAssignmentActiveModel, Entity as RoundAssignments,
    Model as RoundAssignmentModel,
};
pub use super::scores::{ActiveModel as ScoreActiveModel, Entity as Scores, Model as ScoreModel};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
