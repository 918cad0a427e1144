pub mod colorization;
pub mod logger;
