//! Short prose accompanying a report. Outlook and confidence are decided by
//! the scoring engine; narrators only put them into words.

pub mod gemini;
pub mod template;

use crate::analysis::Outlook;
use crate::error::Result;
use crate::models::Category;
use async_trait::async_trait;

pub use gemini::GeminiNarrator;
pub use template::TemplateNarrator;

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeContext {
    pub ticker: String,
    pub name: String,
    pub category: Category,
    pub outlook: Outlook,
    pub confidence: u32,
    pub price: f64,
    pub volume_24h: f64,
    pub price_change_24h: f64,
    pub rsi: f64,
    pub percent_b: f64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, context: &NarrativeContext) -> Result<String>;
}
