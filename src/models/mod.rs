pub mod market;

pub use market::{
    Category, CmcMetrics, CoinSnapshot, DexMetrics, PricePoint, PriceSeries, ResolutionSource,
    TokenIdentity,
};
