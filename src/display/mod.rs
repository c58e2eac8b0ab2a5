pub mod captions;
pub mod chart;
pub mod output;
