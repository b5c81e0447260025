pub mod annual_rainfall;
pub mod daily_variable;
pub mod date_window;
pub mod lat_lon;
