//! Typed commands produced by the parser
//!
//! The parser performs all lexical validation; by the time a `Command`
//! exists its assets and markets are well-formed. Prices and quantities
//! stay raw signed integers so the exchange can apply its own range
//! checks and report typed errors.

use types::asset::Asset;
use types::ids::{OrderId, UserId};
use types::market::Market;
use types::numeric::{Price, Quantity};
use types::order::Side;

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Exit,
    CreateUser {
        name: String,
    },
    GetUser {
        user_id: UserId,
    },
    Deposit {
        user_id: UserId,
        asset: Asset,
        quantity: Quantity,
    },
    Withdraw {
        user_id: UserId,
        asset: Asset,
        quantity: Quantity,
    },
    FreeBalance {
        user_id: UserId,
        asset: Asset,
    },
    ReservedBalance {
        user_id: UserId,
        asset: Asset,
    },
    PlaceLimit {
        user_id: UserId,
        market: Market,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    PlaceMarket {
        user_id: UserId,
        market: Market,
        side: Side,
        quantity: Quantity,
    },
    CancelOrder {
        user_id: UserId,
        order_id: OrderId,
    },
    RegisterMarket {
        market: Market,
    },
}
