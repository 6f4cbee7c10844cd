//! Snapshot subscribers: tabular export, console reporting and the
//! stock time series consumed by charting front-ends.

pub mod console;
pub mod csv_recorder;
pub mod stock_series;

pub use console::ConsoleReporter;
pub use csv_recorder::CsvRecorder;
pub use stock_series::StockSeries;
