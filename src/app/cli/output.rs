use std::fmt::Display;

pub(crate) const NO_RECORDS: &str = "No records to show.";

/// Print one record per line, or a notice when there are none.
pub(crate) fn print_records<T: Display>(records: &[T]) {
    if records.is_empty() {
        println!("{}", NO_RECORDS);
        return;
    }
    for record in records {
        println!("{}", record);
    }
}
