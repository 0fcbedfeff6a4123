use services::AttemptListItem;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub id: i64,
    pub student: String,
    pub day_label: String,
    pub round_label: String,
    pub score_label: String,
    pub completed_at_str: String,
}

impl From<&AttemptListItem> for AttemptRowVm {
    fn from(item: &AttemptListItem) -> Self {
        let round_label = if item.round <= 1 {
            "First try".to_owned()
        } else {
            format!("Retake {}", item.round - 1)
        };
        Self {
            id: item.id,
            student: item.student.clone(),
            day_label: format!("Day {}", item.day),
            round_label,
            score_label: format!("{} / {}", item.correct, item.total),
            completed_at_str: format_datetime(item.completed_at),
        }
    }
}

#[must_use]
pub fn map_attempt_rows(items: &[AttemptListItem]) -> Vec<AttemptRowVm> {
    items.iter().map(AttemptRowVm::from).collect()
}
