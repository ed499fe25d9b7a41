//! Settlement coordinator
//!
//! The [`Exchange`] owns all mutable state of the system: users, wallets,
//! the open-order registry, the matching engine and the trade history. It
//! turns user-facing commands into engine calls, reserves funds before
//! matching, settles every execution against both wallets, and keeps the
//! whole of it consistent after every command.
//!
//! Recoverable conditions come back as typed errors; a settlement step
//! that fails after matching means the accounting is corrupted and the
//! process aborts.

pub mod errors;
pub mod exchange;
pub mod trade_history;

pub use self::errors::{
    CancelOrderError, PlaceOrderError, RegisterMarketError, UserError, WalletOperationError,
};
pub use self::exchange::{Exchange, OrderCancellation, OrderPlacementResult};
pub use self::trade_history::TradeHistory;
