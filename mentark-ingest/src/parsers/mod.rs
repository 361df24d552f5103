pub mod tasks_csv;

pub use tasks_csv::parse_tasks_csv;
