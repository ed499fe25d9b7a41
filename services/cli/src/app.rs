//! Command dispatch
//!
//! Routes typed commands into the exchange and maps every domain error
//! onto the single user-visible application error code enum. The
//! dispatcher owns the exchange; the printer renders whatever comes out.

use exchange::{
    CancelOrderError, Exchange, PlaceOrderError, RegisterMarketError, UserError,
    WalletOperationError,
};
use tracing::debug;
use types::asset::Asset;
use types::ids::{OrderId, UserId};
use types::market::Market;
use types::numeric::{Price, Quantity};
use types::order::Side;

use crate::command::Command;
use crate::errors::{AppError, AppErrorCode};

/// Result of dispatching one command
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    HelpRequested,
    ExitRequested,
    UserCreated { user_id: u64, name: String },
    UserRead { user_id: u64, name: String },
    DepositDone { user_id: u64, asset: String, amount: i64 },
    WithdrawDone { user_id: u64, asset: String, amount: i64 },
    FreeBalanceRead { user_id: u64, asset: String, free: i64 },
    ReservedBalanceRead { user_id: u64, asset: String, reserved: i64 },
    LimitOrderPlaced { order_id: u64, filled: i64, remaining: i64 },
    MarketOrderExecuted { order_id: u64, filled: i64, remaining: i64 },
    OrderCanceled { order_id: u64, side: String, remaining: i64 },
    MarketRegistered { market: String },
    Error(AppError),
}

/// The application: one exchange driven by parsed commands
#[derive(Debug, Default)]
pub struct CliApp {
    exchange: Exchange,
}

impl CliApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, command: Command) -> DispatchResult {
        debug!(?command, "dispatching command");

        match command {
            Command::Help => DispatchResult::HelpRequested,
            Command::Exit => DispatchResult::ExitRequested,
            Command::CreateUser { name } => self.create_user(name),
            Command::GetUser { user_id } => self.get_user(user_id),
            Command::Deposit { user_id, asset, quantity } => self.deposit(user_id, asset, quantity),
            Command::Withdraw { user_id, asset, quantity } => {
                self.withdraw(user_id, asset, quantity)
            }
            Command::FreeBalance { user_id, asset } => self.free_balance(user_id, asset),
            Command::ReservedBalance { user_id, asset } => self.reserved_balance(user_id, asset),
            Command::PlaceLimit { user_id, market, side, price, quantity } => {
                self.place_limit(user_id, market, side, price, quantity)
            }
            Command::PlaceMarket { user_id, market, side, quantity } => {
                self.place_market(user_id, market, side, quantity)
            }
            Command::CancelOrder { user_id, order_id } => self.cancel_order(user_id, order_id),
            Command::RegisterMarket { market } => self.register_market(market),
        }
    }

    fn create_user(&mut self, name: String) -> DispatchResult {
        match self.exchange.create_user(&name) {
            Ok(user_id) => DispatchResult::UserCreated {
                user_id: user_id.get(),
                name,
            },
            Err(UserError::EmptyName) => {
                DispatchResult::Error(AppError::new(AppErrorCode::EmptyName, "Empty user name"))
            }
            Err(UserError::UserAlreadyExists) => DispatchResult::Error(AppError::new(
                AppErrorCode::UserAlreadyExists,
                "User already exists",
            )),
            Err(UserError::UserNotFound) => internal_error(),
        }
    }

    fn get_user(&mut self, user_id: UserId) -> DispatchResult {
        match self.exchange.get_user_name(user_id) {
            Ok(name) => DispatchResult::UserRead {
                user_id: user_id.get(),
                name: name.to_string(),
            },
            Err(UserError::UserNotFound) => {
                DispatchResult::Error(AppError::new(AppErrorCode::UserNotFound, "User not found"))
            }
            Err(_) => internal_error(),
        }
    }

    fn deposit(
        &mut self,
        user_id: UserId,
        asset: Asset,
        quantity: Quantity,
    ) -> DispatchResult {
        match self.exchange.deposit(user_id, &asset, quantity) {
            Ok(()) => DispatchResult::DepositDone {
                user_id: user_id.get(),
                asset: asset.to_string(),
                amount: quantity.get(),
            },
            Err(error) => DispatchResult::Error(map_wallet_error(error)),
        }
    }

    fn withdraw(
        &mut self,
        user_id: UserId,
        asset: Asset,
        quantity: Quantity,
    ) -> DispatchResult {
        match self.exchange.withdraw(user_id, &asset, quantity) {
            Ok(()) => DispatchResult::WithdrawDone {
                user_id: user_id.get(),
                asset: asset.to_string(),
                amount: quantity.get(),
            },
            Err(error) => DispatchResult::Error(map_wallet_error(error)),
        }
    }

    fn free_balance(
        &mut self,
        user_id: UserId,
        asset: Asset,
    ) -> DispatchResult {
        match self.exchange.free_balance(user_id, &asset) {
            Ok(free) => DispatchResult::FreeBalanceRead {
                user_id: user_id.get(),
                asset: asset.to_string(),
                free: free.get(),
            },
            Err(error) => DispatchResult::Error(map_wallet_error(error)),
        }
    }

    fn reserved_balance(
        &mut self,
        user_id: UserId,
        asset: Asset,
    ) -> DispatchResult {
        match self.exchange.reserved_balance(user_id, &asset) {
            Ok(reserved) => DispatchResult::ReservedBalanceRead {
                user_id: user_id.get(),
                asset: asset.to_string(),
                reserved: reserved.get(),
            },
            Err(error) => DispatchResult::Error(map_wallet_error(error)),
        }
    }

    fn place_limit(
        &mut self,
        user_id: UserId,
        market: Market,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> DispatchResult {
        match self
            .exchange
            .place_limit_order(user_id, &market, side, price, quantity)
        {
            Ok(placed) => DispatchResult::LimitOrderPlaced {
                order_id: placed.order_id.get(),
                filled: placed.filled_quantity.get(),
                remaining: placed.remaining_quantity.get(),
            },
            Err(error) => DispatchResult::Error(map_place_order_error(error)),
        }
    }

    fn place_market(
        &mut self,
        user_id: UserId,
        market: Market,
        side: Side,
        quantity: Quantity,
    ) -> DispatchResult {
        match self
            .exchange
            .execute_market_order(user_id, &market, side, quantity)
        {
            Ok(executed) => DispatchResult::MarketOrderExecuted {
                order_id: executed.order_id.get(),
                filled: executed.filled_quantity.get(),
                remaining: executed.remaining_quantity.get(),
            },
            Err(error) => DispatchResult::Error(map_place_order_error(error)),
        }
    }

    fn cancel_order(
        &mut self,
        user_id: UserId,
        order_id: OrderId,
    ) -> DispatchResult {
        match self.exchange.cancel_order(user_id, order_id) {
            Ok(cancelled) => DispatchResult::OrderCanceled {
                order_id: cancelled.order_id.get(),
                side: cancelled.side.to_string(),
                remaining: cancelled.remaining_quantity.get(),
            },
            Err(CancelOrderError::UserNotFound) => {
                DispatchResult::Error(AppError::new(AppErrorCode::UserNotFound, "User not found"))
            }
            Err(CancelOrderError::OrderNotFound) => {
                DispatchResult::Error(AppError::new(AppErrorCode::OrderNotFound, "Order not found"))
            }
            Err(CancelOrderError::NotOrderOwner) => DispatchResult::Error(AppError::new(
                AppErrorCode::NotOrderOwner,
                "Not order owner",
            )),
        }
    }

    fn register_market(&mut self, market: Market) -> DispatchResult {
        let display = market.to_string();
        match self.exchange.register_market(market) {
            Ok(()) => DispatchResult::MarketRegistered { market: display },
            Err(RegisterMarketError::AlreadyListed) => DispatchResult::Error(AppError::new(
                AppErrorCode::MarketAlreadyListed,
                "Market already listed",
            )),
        }
    }
}

fn internal_error() -> DispatchResult {
    DispatchResult::Error(AppError::new(AppErrorCode::InternalError, "Internal error"))
}

fn map_wallet_error(error: WalletOperationError) -> AppError {
    match error {
        WalletOperationError::UserNotFound => {
            AppError::new(AppErrorCode::UserNotFound, "User not found")
        }
        WalletOperationError::InsufficientFunds => {
            AppError::new(AppErrorCode::InsufficientFunds, "Insufficient funds")
        }
        WalletOperationError::InsufficientReserved => AppError::new(
            AppErrorCode::InsufficientReserved,
            "Insufficient reserved balance",
        ),
        WalletOperationError::InvalidQuantity => {
            AppError::new(AppErrorCode::InvalidQuantity, "Invalid quantity")
        }
    }
}

fn map_place_order_error(error: PlaceOrderError) -> AppError {
    match error {
        PlaceOrderError::UserNotFound => {
            AppError::new(AppErrorCode::UserNotFound, "User not found")
        }
        PlaceOrderError::MarketNotListed => {
            AppError::new(AppErrorCode::MarketNotListed, "Market not listed")
        }
        PlaceOrderError::InvalidQuantity => {
            AppError::new(AppErrorCode::InvalidQuantity, "Invalid quantity")
        }
        PlaceOrderError::InvalidAmount => {
            AppError::new(AppErrorCode::InvalidAmount, "Invalid amount")
        }
        PlaceOrderError::InsufficientFunds => {
            AppError::new(AppErrorCode::InsufficientFunds, "Insufficient funds")
        }
    }
}
