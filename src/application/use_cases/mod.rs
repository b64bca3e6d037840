pub mod import_directory;
pub mod occupant_history;
