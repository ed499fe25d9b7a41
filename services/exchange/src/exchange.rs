//! The exchange: command validation, fund reservation and settlement
//!
//! Every order placement follows the same pipeline: validate, reserve the
//! funds the order could consume, register the order, hand it to the
//! matching engine, then settle each returned execution against both
//! wallets and record the trade.
//!
//! The open-order registry, the book index and the wallet reservations
//! form the consistency triangle: every code path that mutates one of
//! them restores the other two before returning. Settlement failures
//! after matching mean the triangle is broken and the process aborts.

use std::collections::HashMap;

use matching_engine::{Execution, MatchingEngine, OrderRequest};
use tracing::{debug, info};
use types::asset::Asset;
use types::ids::{IdGenerator, OrderId, TradeId, UserId};
use types::market::Market;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Trade;
use types::user::User;
use types::wallet::{Wallet, WalletError};

use crate::errors::{
    CancelOrderError, PlaceOrderError, RegisterMarketError, UserError, WalletOperationError,
};
use crate::trade_history::TradeHistory;

/// Outcome of placing a limit or market order
///
/// For limit orders both quantities are in base units. For market orders
/// the unit follows the request denomination: quote for buys (budget
/// spent / returned), base for sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPlacementResult {
    pub order_id: OrderId,
    pub filled_quantity: Quantity,
    pub remaining_quantity: Quantity,
}

/// Outcome of cancelling a resting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderCancellation {
    pub order_id: OrderId,
    pub side: Side,
    pub remaining_quantity: Quantity,
}

/// Single-process spot exchange: users, wallets, matching, settlement
#[derive(Debug, Default)]
pub struct Exchange {
    users: HashMap<UserId, User>,
    wallets: HashMap<UserId, Wallet>,
    engine: MatchingEngine,
    trade_history: TradeHistory,
    /// Open-order registry: owner and market of every live order.
    /// Entries exist from just before engine submission until full fill
    /// or cancel; market orders are purged before the placing call
    /// returns.
    order_owners: HashMap<OrderId, UserId>,
    order_markets: HashMap<OrderId, Market>,
    user_ids: IdGenerator<UserId>,
    order_ids: IdGenerator<OrderId>,
    trade_ids: IdGenerator<TradeId>,
}

impl Exchange {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------

    /// Create a user with an empty wallet
    pub fn create_user(&mut self, name: &str) -> Result<UserId, UserError> {
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }

        let user_id = self.user_ids.next();
        if self.users.insert(user_id, User::new(user_id, name)).is_some() {
            return Err(UserError::UserAlreadyExists);
        }

        let prior_wallet = self.wallets.insert(user_id, Wallet::new());
        assert!(
            prior_wallet.is_none(),
            "wallet for freshly generated user id already exists"
        );

        info!(user_id = %user_id, name, "user created");
        Ok(user_id)
    }

    pub fn get_user_name(&self, user_id: UserId) -> Result<&str, UserError> {
        self.users
            .get(&user_id)
            .map(User::name)
            .ok_or(UserError::UserNotFound)
    }

    pub fn user_exists(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    // -----------------------------------------------------------------
    // Wallet operations
    // -----------------------------------------------------------------

    pub fn deposit(
        &mut self,
        user_id: UserId,
        asset: &Asset,
        amount: Quantity,
    ) -> Result<(), WalletOperationError> {
        let wallet = self
            .wallets
            .get_mut(&user_id)
            .ok_or(WalletOperationError::UserNotFound)?;

        wallet.deposit(asset, amount).map_err(|error| match error {
            WalletError::InvalidAmount => WalletOperationError::InvalidQuantity,
            WalletError::InsufficientFunds | WalletError::InsufficientReserved => {
                unreachable!("deposit cannot fail with {error}")
            }
        })?;

        debug!(user_id = %user_id, asset = %asset, amount = %amount, "deposit");
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        user_id: UserId,
        asset: &Asset,
        amount: Quantity,
    ) -> Result<(), WalletOperationError> {
        let wallet = self
            .wallets
            .get_mut(&user_id)
            .ok_or(WalletOperationError::UserNotFound)?;

        wallet.withdraw(asset, amount).map_err(|error| match error {
            WalletError::InvalidAmount => WalletOperationError::InvalidQuantity,
            WalletError::InsufficientFunds => WalletOperationError::InsufficientFunds,
            WalletError::InsufficientReserved => {
                unreachable!("withdraw cannot fail with {error}")
            }
        })?;

        debug!(user_id = %user_id, asset = %asset, amount = %amount, "withdraw");
        Ok(())
    }

    pub fn reserve(
        &mut self,
        user_id: UserId,
        asset: &Asset,
        amount: Quantity,
    ) -> Result<(), WalletOperationError> {
        let wallet = self
            .wallets
            .get_mut(&user_id)
            .ok_or(WalletOperationError::UserNotFound)?;

        wallet.reserve(asset, amount).map_err(|error| match error {
            WalletError::InvalidAmount => WalletOperationError::InvalidQuantity,
            WalletError::InsufficientFunds => WalletOperationError::InsufficientFunds,
            WalletError::InsufficientReserved => {
                unreachable!("reserve cannot fail with {error}")
            }
        })
    }

    pub fn release(
        &mut self,
        user_id: UserId,
        asset: &Asset,
        amount: Quantity,
    ) -> Result<(), WalletOperationError> {
        let wallet = self
            .wallets
            .get_mut(&user_id)
            .ok_or(WalletOperationError::UserNotFound)?;

        wallet.release(asset, amount).map_err(|error| match error {
            WalletError::InvalidAmount => WalletOperationError::InvalidQuantity,
            WalletError::InsufficientReserved => WalletOperationError::InsufficientReserved,
            WalletError::InsufficientFunds => {
                unreachable!("release cannot fail with {error}")
            }
        })
    }

    pub fn free_balance(
        &self,
        user_id: UserId,
        asset: &Asset,
    ) -> Result<Quantity, WalletOperationError> {
        self.wallets
            .get(&user_id)
            .map(|wallet| wallet.free_balance(asset))
            .ok_or(WalletOperationError::UserNotFound)
    }

    pub fn reserved_balance(
        &self,
        user_id: UserId,
        asset: &Asset,
    ) -> Result<Quantity, WalletOperationError> {
        self.wallets
            .get(&user_id)
            .map(|wallet| wallet.reserved_balance(asset))
            .ok_or(WalletOperationError::UserNotFound)
    }

    // -----------------------------------------------------------------
    // Markets
    // -----------------------------------------------------------------

    pub fn register_market(&mut self, market: Market) -> Result<(), RegisterMarketError> {
        if self.engine.has_market(&market) {
            return Err(RegisterMarketError::AlreadyListed);
        }

        info!(market = %market, "market registered");
        self.engine.register_market(market);
        Ok(())
    }

    pub fn best_bid(&self, market: &Market) -> Option<Price> {
        self.engine.best_bid(market)
    }

    pub fn best_ask(&self, market: &Market) -> Option<Price> {
        self.engine.best_ask(market)
    }

    // -----------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------

    /// Place a limit order: reserve, match, settle, rest the remainder
    pub fn place_limit_order(
        &mut self,
        user_id: UserId,
        market: &Market,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<OrderPlacementResult, PlaceOrderError> {
        if !user_id.is_valid() {
            return Err(PlaceOrderError::UserNotFound);
        }
        if !self.engine.has_market(market) {
            return Err(PlaceOrderError::MarketNotListed);
        }
        if !quantity.is_positive() {
            return Err(PlaceOrderError::InvalidQuantity);
        }
        if !self.wallets.contains_key(&user_id) {
            return Err(PlaceOrderError::UserNotFound);
        }
        if !price.is_positive() {
            return Err(PlaceOrderError::InvalidAmount);
        }

        let (asset_to_reserve, quantity_to_reserve) = match side {
            Side::Buy => (market.quote(), price.notional(quantity)),
            Side::Sell => (market.base(), quantity),
        };

        let wallet = self.wallets.get_mut(&user_id).expect("wallet checked above");
        wallet
            .reserve(asset_to_reserve, quantity_to_reserve)
            .map_err(|_| PlaceOrderError::InsufficientFunds)?;

        let order_id = self.order_ids.next();
        self.order_owners.insert(order_id, user_id);
        self.order_markets.insert(order_id, market.clone());

        let outcome = self.engine.submit(OrderRequest::Limit {
            order_id,
            market: market.clone(),
            side,
            limit_price: price,
            base_quantity: quantity,
        });

        for execution in &outcome.executions {
            self.settle_execution(market, execution);
        }

        let filled_quantity = quantity - outcome.remaining;
        info!(
            order_id = %order_id,
            user_id = %user_id,
            market = %market,
            side = %side,
            price = %price,
            filled = %filled_quantity,
            remaining = %outcome.remaining,
            "limit order placed"
        );

        Ok(OrderPlacementResult {
            order_id,
            filled_quantity,
            remaining_quantity: outcome.remaining,
        })
    }

    /// Execute a market order: reserve, match, settle, release the
    /// unused reservation
    ///
    /// For buys `quantity` is a quote budget; for sells it is a base
    /// quantity. Market orders never rest and never leave registry
    /// entries behind.
    pub fn execute_market_order(
        &mut self,
        user_id: UserId,
        market: &Market,
        side: Side,
        quantity: Quantity,
    ) -> Result<OrderPlacementResult, PlaceOrderError> {
        if !user_id.is_valid() {
            return Err(PlaceOrderError::UserNotFound);
        }
        if !self.engine.has_market(market) {
            return Err(PlaceOrderError::MarketNotListed);
        }
        if !quantity.is_positive() {
            return Err(PlaceOrderError::InvalidQuantity);
        }
        if !self.wallets.contains_key(&user_id) {
            return Err(PlaceOrderError::UserNotFound);
        }

        let reserve_asset = match side {
            Side::Buy => market.quote(),
            Side::Sell => market.base(),
        };

        let wallet = self.wallets.get_mut(&user_id).expect("wallet checked above");
        wallet
            .reserve(reserve_asset, quantity)
            .map_err(|_| PlaceOrderError::InsufficientFunds)?;

        let order_id = self.order_ids.next();
        self.order_owners.insert(order_id, user_id);
        self.order_markets.insert(order_id, market.clone());

        let outcome = self.engine.submit(match side {
            Side::Buy => OrderRequest::MarketBuyByQuote {
                order_id,
                market: market.clone(),
                quote_budget: quantity,
            },
            Side::Sell => OrderRequest::MarketSellByBase {
                order_id,
                market: market.clone(),
                base_quantity: quantity,
            },
        });

        for execution in &outcome.executions {
            self.settle_execution(market, execution);
        }

        // the unfilled part of the reservation goes back to free
        if outcome.remaining.is_positive() {
            let wallet = self.wallets.get_mut(&user_id).expect("wallet checked above");
            wallet
                .release(reserve_asset, outcome.remaining)
                .expect("market order residual reservation must be releasable");
        }

        // market orders never rest; drop any registry entry the fill
        // flags did not already tear down
        self.order_owners.remove(&order_id);
        self.order_markets.remove(&order_id);

        let filled_quantity = quantity - outcome.remaining;
        info!(
            order_id = %order_id,
            user_id = %user_id,
            market = %market,
            side = %side,
            filled = %filled_quantity,
            remaining = %outcome.remaining,
            "market order executed"
        );

        Ok(OrderPlacementResult {
            order_id,
            filled_quantity,
            remaining_quantity: outcome.remaining,
        })
    }

    /// Cancel a resting order and release its remaining reservation
    pub fn cancel_order(
        &mut self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<OrderCancellation, CancelOrderError> {
        if !self.users.contains_key(&user_id) {
            return Err(CancelOrderError::UserNotFound);
        }

        let owner = *self
            .order_owners
            .get(&order_id)
            .ok_or(CancelOrderError::OrderNotFound)?;
        if owner != user_id {
            return Err(CancelOrderError::NotOrderOwner);
        }

        let market = self
            .order_markets
            .get(&order_id)
            .cloned()
            .expect("registered order must have a market");

        let cancelled = self
            .engine
            .cancel(&market, order_id)
            .expect("registered order must be cancellable in its book");

        let (release_asset, release_amount) = match cancelled.side {
            Side::Buy => (
                market.quote(),
                cancelled.price.notional(cancelled.remaining_quantity),
            ),
            Side::Sell => (market.base(), cancelled.remaining_quantity),
        };

        let wallet = self
            .wallets
            .get_mut(&user_id)
            .expect("order owner must have a wallet");
        wallet
            .release(release_asset, release_amount)
            .expect("cancelled order reservation must be releasable");

        self.order_owners.remove(&order_id);
        self.order_markets.remove(&order_id);

        info!(
            order_id = %order_id,
            user_id = %user_id,
            side = %cancelled.side,
            remaining = %cancelled.remaining_quantity,
            "order cancelled"
        );

        Ok(OrderCancellation {
            order_id,
            side: cancelled.side,
            remaining_quantity: cancelled.remaining_quantity,
        })
    }

    // -----------------------------------------------------------------
    // Trade history
    // -----------------------------------------------------------------

    pub fn market_history(&self, market: &Market) -> &[Trade] {
        self.trade_history.market_history(market)
    }

    // -----------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------

    /// Settle one execution against both wallets and record the trade
    ///
    /// Every wallet call here is an invariant check: the reservations
    /// were made before matching, so a failure means the accounting no
    /// longer agrees with the book and the process must abort.
    fn settle_execution(&mut self, market: &Market, execution: &Execution) {
        let buyer = *self
            .order_owners
            .get(&execution.buy_order_id)
            .expect("buy order must be in the open-order registry");
        let seller = *self
            .order_owners
            .get(&execution.sell_order_id)
            .expect("sell order must be in the open-order registry");

        let notional = execution.execution_price.notional(execution.quantity);

        let buyer_wallet = self
            .wallets
            .get_mut(&buyer)
            .expect("buyer must have a wallet");
        buyer_wallet
            .consume_reserved(market.quote(), notional)
            .expect("buyer reserved quote must cover the executed notional");

        // the buyer reserved at their limit price; the taker keeps the
        // improvement when the maker's price was better
        if execution.buy_order_limit_price > execution.execution_price {
            let refund = execution.buy_order_limit_price.notional(execution.quantity) - notional;
            buyer_wallet
                .release(market.quote(), refund)
                .expect("buyer price-improvement refund must be releasable");
        }
        buyer_wallet
            .deposit(market.base(), execution.quantity)
            .expect("buyer base deposit must succeed");

        let seller_wallet = self
            .wallets
            .get_mut(&seller)
            .expect("seller must have a wallet");
        seller_wallet
            .consume_reserved(market.base(), execution.quantity)
            .expect("seller reserved base must cover the executed quantity");
        seller_wallet
            .deposit(market.quote(), notional)
            .expect("seller quote deposit must succeed");

        let trade = Trade::new(
            self.trade_ids.next(),
            buyer,
            seller,
            execution.buy_order_id,
            execution.sell_order_id,
            market.clone(),
            execution.quantity,
            execution.execution_price,
        );
        debug!(
            trade_id = %trade.trade_id,
            market = %market,
            quantity = %trade.quantity,
            price = %trade.price,
            "trade settled"
        );
        self.trade_history.add(trade);

        if execution.buy_fully_filled {
            self.order_owners.remove(&execution.buy_order_id);
            self.order_markets.remove(&execution.buy_order_id);
        }
        if execution.sell_fully_filled {
            self.order_owners.remove(&execution.sell_order_id);
            self.order_markets.remove(&execution.sell_order_id);
        }
    }
}
