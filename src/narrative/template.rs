use crate::analysis::Outlook;
use crate::error::Result;
use crate::models::Category;
use crate::narrative::{NarrativeContext, NarrativeGenerator};
use async_trait::async_trait;

const AI_BULLISH: &[&str] = &[
    "{ticker} ends up routing payments between half the autonomous agents on-chain. Early is a state of mind.",
    "By the next cycle {ticker} is plumbing for machine-to-machine commerce. Screenshot this chart.",
    "The models picked {ticker} long before the humans did. Accumulation looks quiet from the outside.",
];

const AI_BEARISH: &[&str] = &[
    "{ticker} has run hotter than a GPU cluster. Even agents take profit sometimes.",
    "Too many tourists in {ticker}. The shakeout comes before the next leg.",
    "Overclocked silicon needs a cooldown. {ticker} will offer a better entry.",
];

const RWA_BULLISH: &[&str] = &[
    "{ticker} ends up holding a slice of every treasury desk's balance sheet. TradFi arrives late, as usual.",
    "When pension funds finally discover {ticker}, the order books get very thin.",
    "Bonds, deeds, invoices. {ticker} is where the old money learns to settle on-chain.",
];

const RWA_BEARISH: &[&str] = &[
    "{ticker} is priced for perfection. Institutions sell into exactly this kind of excitement.",
    "Everyone is suddenly an RWA expert. {ticker} needs to breathe before it climbs again.",
    "{ticker} revisits lower levels first. Keep the dry powder dry.",
];

const MEME_BULLISH: &[&str] = &[
    "{ticker} graduates from joke to culture. The chart was never the punchline.",
    "One viral post about {ticker} and a zero appears. Then another one.",
    "{ticker} gets quoted on a central bank slide deck. Nobody can explain it, nobody needs to.",
];

const MEME_BEARISH: &[&str] = &[
    "{ticker} is at peak group-chat euphoria. This film has a known ending.",
    "Your barber just asked about {ticker}. Consider touching grass.",
    "{ticker} needs its cooldown arc. Every meme cycle has one.",
];

const GENERIC_BULLISH: &[&str] = &[
    "{ticker} is building a base while nobody watches. Patience pays the quiet ones.",
    "The signals line up for {ticker}. Slow grind up, then all at once.",
    "{ticker} holds its ground while the rest of the market wobbles. That is usually a tell.",
];

const GENERIC_BEARISH: &[&str] = &[
    "{ticker} looks stretched. The next move is sideways at best.",
    "Momentum in {ticker} is fading. Let the price come to you.",
    "{ticker} has more sellers waiting than buyers arriving. Wait for the flush.",
];

/// Deterministic prose chosen from fixed sets by sector and outlook.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }

    fn templates(category: Category, outlook: Outlook) -> &'static [&'static str] {
        match (category, outlook) {
            (Category::Ai, Outlook::Bullish) => AI_BULLISH,
            (Category::Ai, Outlook::Bearish) => AI_BEARISH,
            (Category::Rwa, Outlook::Bullish) => RWA_BULLISH,
            (Category::Rwa, Outlook::Bearish) => RWA_BEARISH,
            (Category::Meme, Outlook::Bullish) => MEME_BULLISH,
            (Category::Meme, Outlook::Bearish) => MEME_BEARISH,
            (_, Outlook::Bullish) => GENERIC_BULLISH,
            (_, Outlook::Bearish) => GENERIC_BEARISH,
        }
    }

    pub fn render(&self, context: &NarrativeContext) -> String {
        let set = Self::templates(context.category, context.outlook);
        let seed: usize = context.ticker.bytes().map(usize::from).sum();
        set[seed % set.len()].replace("{ticker}", &context.ticker)
    }
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrator {
    async fn generate(&self, context: &NarrativeContext) -> Result<String> {
        Ok(self.render(context))
    }
}
