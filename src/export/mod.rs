//! Collaborator-facing output shapes
//!
//! The rendering layer consumes chart-ready series; the assistant layer
//! consumes a flattened text serialization of the three collections. Both
//! are thin, presentation-free projections of the aggregation engines.

pub mod chart;
pub mod context;

pub use chart::{
    age_distribution_chart, category_chart, clv_chart, order_source_chart,
    price_distribution_chart, product_popularity_chart, revenue_chart, ChartSeries, Dataset,
    PRICE_HISTOGRAM_BINS,
};
pub use context::{build_context, DEFAULT_CONTEXT_LIMIT};
