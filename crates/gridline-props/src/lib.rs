// Prop analysis: historical hit rates, edge against a book price, the value
// scan across the roster, and line shopping over live quotes.

pub mod edge;
pub mod hit_rate;
pub mod scan;
pub mod shopping;

pub use edge::{evaluate, EdgeThresholds, PropValuation, Recommendation, Side, SideEdge, Verdict};
pub use hit_rate::{compute_hit_rate, HitRate};
pub use scan::{scan_value_props, ScanRequest, ValueProp, ValueScan};
