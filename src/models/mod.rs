//! Domain models shared across the LazySignal dashboard.

pub mod snapshot;
pub mod subscription;
pub mod view;

pub use snapshot::{Snapshot, StrategyParams};
pub use subscription::{
    CustomFields, CustomStrategyParams, SubscribeForm, SubscriptionRequest, CUSTOM_STRATEGY,
    DEFAULT_STRATEGY,
};
pub use view::{Badge, MaEntry, SignalView, StatusKind, StatusMessage, StrategyPanel, ViewModel};
