pub mod calendar_file;
pub mod interactive_cmd;
