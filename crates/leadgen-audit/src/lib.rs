//! Website performance audit: PageSpeed Insights plus homepage UI
//! heuristics, combined into a single 0–100 score with a revenue-impact
//! label and recommendations.

pub mod auditor;
pub mod error;
pub mod pagespeed;
pub mod score;
pub mod ui;

pub use auditor::{WebsiteAudit, WebsiteAuditor};
pub use error::AuditError;
pub use pagespeed::{DesktopReport, MobileReport, PageSpeedClient};
pub use score::{recommendations, weighted_score, RevenueImpact};
pub use ui::{analyze_ui, UiReport};
