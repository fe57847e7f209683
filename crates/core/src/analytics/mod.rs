//! Analytics over stored transactions.

mod analytics_calculator;
mod analytics_model;

pub use analytics_calculator::{percentage_change, summarize};
pub use analytics_model::{
    AnalyticsReport, BasicStats, CounterpartyStats, DailyStats, FlowMetric, HourlyStats,
    OriginAnalysis, OriginStats, TimeAnalysis, TransactionAnalysis, UserAnalysis,
};
