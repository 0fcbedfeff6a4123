mod history_vm;
mod quiz_vm;
mod time_fmt;

pub use history_vm::{AttemptRowVm, map_attempt_rows};
pub use quiz_vm::{
    INTRO_MESSAGE, MissedRowVm, QuestionVm, QuizPageVm, QuizStage, ResultVm, map_quiz_page,
    notice_message, vocabulary_caption,
};
pub use time_fmt::format_datetime;
