pub mod timepoint;
