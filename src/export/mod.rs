pub mod csv_export;

pub use csv_export::export_to_csv;
