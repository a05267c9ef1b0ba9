pub mod exporter;

pub use exporter::TabularExporter;
