//! Rate statistics module
//!
//! Min/max over exact decimal rates, the public trade dump format, and the
//! sample sink used to hand a rate series to an external plotter

mod executions;
mod rates;
mod sink;

pub use executions::{load_executions, Execution};
pub use rates::{parse_rates, to_samples, RateRange, StatsError};
pub use sink::{SampleSink, WriterSink};
