//! Design tokens: the built-in theme and the store utilities resolve against.

mod defaults;
mod store;

pub use store::{
    flatten_entries, ThemeToken, TokenEntries, TokenKey, TokenStore, TokenStoreBuilder, TokenValue,
};
