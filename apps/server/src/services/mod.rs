//! Business logic services.

pub mod suggestion;

pub use suggestion::{
    DifyClient, DisabledProvider, SuggestionProvider, SuggestionService, provider_from_config,
};
