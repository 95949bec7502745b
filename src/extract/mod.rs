//! Text extraction strategies.
//!
//! Extraction is an ordered chain of interchangeable strategies. Each strategy
//! looks at the raw input and either produces text or declines with `None`;
//! the first strategy that produces text wins.
//!
//! # Example
//!
//! ```no_run
//! use unhwp::extract::{FallbackExtractor, StrategyChain, StructuredStrategy};
//! use std::sync::Arc;
//!
//! let mut chain = StrategyChain::new();
//! chain.push(Arc::new(StructuredStrategy::default()));
//! chain.push(Arc::new(FallbackExtractor::default()));
//!
//! let data = std::fs::read("notice.hwp").unwrap();
//! if let Some(found) = chain.run(&data) {
//!     println!("[{}] {}", found.strategy, found.text);
//! }
//! ```

mod fallback;
mod structured;

pub use fallback::{decode_utf16le_lossy, extract_fallback, FallbackExtractor, FallbackOptions};
pub use structured::StructuredStrategy;

use std::sync::Arc;

/// One way of turning raw input bytes into text.
pub trait ExtractionStrategy: Send + Sync {
    /// Name of this strategy, used in logs and reports.
    fn name(&self) -> &str;

    /// Extract text, or `None` if this strategy cannot.
    ///
    /// Implementations must not panic on arbitrary input.
    fn extract(&self, data: &[u8]) -> Option<String>;
}

/// Text produced by a chain, with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub strategy: String,
    pub text: String,
}

/// Ordered list of strategies tried in turn.
#[derive(Clone, Default)]
pub struct StrategyChain {
    strategies: Vec<Arc<dyn ExtractionStrategy>>,
}

impl StrategyChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy to the end of the chain.
    pub fn push(&mut self, strategy: Arc<dyn ExtractionStrategy>) {
        self.strategies.push(strategy);
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, strategy: Arc<dyn ExtractionStrategy>) -> Self {
        self.push(strategy);
        self
    }

    /// Names of the strategies, in order.
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run the strategies in order and return the first result.
    pub fn run(&self, data: &[u8]) -> Option<Extraction> {
        for strategy in &self.strategies {
            if let Some(text) = strategy.extract(data) {
                log::debug!("Extracted {} bytes via {}", text.len(), strategy.name());
                return Some(Extraction {
                    strategy: strategy.name().to_string(),
                    text,
                });
            }
            log::debug!("Strategy {} produced nothing", strategy.name());
        }
        None
    }

    /// Run the strategies and return only the text.
    pub fn extract(&self, data: &[u8]) -> Option<String> {
        self.run(data).map(|found| found.text)
    }
}

impl std::fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
