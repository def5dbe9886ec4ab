pub mod file_row;
pub mod histogram_chart;
pub mod line_chart;
