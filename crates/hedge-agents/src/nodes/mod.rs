//! Workflow node implementations

pub mod fundamentals;
pub mod portfolio;
pub mod risk;
pub mod sentiment;
pub mod technical;
pub mod valuation;

pub use fundamentals::FundamentalsAnalystNode;
pub use portfolio::PortfolioManagementNode;
pub use risk::RiskManagementNode;
pub use sentiment::SentimentAnalystNode;
pub use technical::TechnicalAnalystNode;
pub use valuation::ValuationAnalystNode;
