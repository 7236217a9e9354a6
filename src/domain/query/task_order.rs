use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::entities::task::Task;

/// Open tasks first, then `High < Medium < Low`, then earliest due date.
/// Tasks without a due date sort after dated ones.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.is_completed()
        .cmp(&b.is_completed())
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
        .then_with(|| compare_due(a.due_date, b.due_date))
}

fn compare_due(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}
