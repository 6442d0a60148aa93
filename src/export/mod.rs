pub mod writer;

pub use writer::{default_output_dir, export_csv, export_path, write_table};
