use chrono::NaiveDate;

/// Returns every calendar day in `[start, end]` inclusive, ascending.
pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        if let Some(next) = current.succ_opt() {
            current = next;
        } else {
            // NaiveDate::MAX, unreachable for real ranges
            break;
        }
    }
    days
}
