// Storage module: persisting the result grouping.

pub mod results_file;

pub use results_file::ResultsFile;
