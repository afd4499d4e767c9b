mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{
    OptionVm, PassageVm, QuestionVm, QuizIntent, ReviewRowVm, ReviewVm, apply_intent, map_passage,
    map_questions, map_review, stage_label,
};
pub use time_fmt::{timer_class, timer_status};
