pub mod flood_fill;
pub mod metrics;
pub mod sampling;

pub use flood_fill::flood_fill;
pub use metrics::{EuclideanMetric, ManhattanMetric};
pub use sampling::sample_seeds;
