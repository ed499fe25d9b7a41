//! Command parser
//!
//! Turns a tokenized line into a typed [`Command`]. Every argument is
//! validated lexically here, so the dispatch layer only ever sees
//! well-formed assets, markets and sides; numeric range rules stay with
//! the exchange.

use crate::command::Command;
use crate::errors::{ParseError, ParseErrorCode};
use crate::tokenizer::{tokenize, Token};
use types::asset::Asset;
use types::ids::{OrderId, UserId};
use types::market::Market;
use types::numeric::{Price, Quantity};
use types::order::Side;

/// Parse one input line into a command
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(line)?;

    match tokens[0].text.as_str() {
        "help" => {
            expect_argument_count(&tokens, 1)?;
            Ok(Command::Help)
        }
        "exit" => {
            expect_argument_count(&tokens, 1)?;
            Ok(Command::Exit)
        }
        "create-user" => parse_create_user(&tokens),
        "get-user" => parse_get_user(&tokens),
        "deposit" => parse_deposit(&tokens),
        "withdraw" => parse_withdraw(&tokens),
        "free-balance" => parse_free_balance(&tokens),
        "reserved-balance" => parse_reserved_balance(&tokens),
        "place-limit" => parse_place_limit(&tokens),
        "place-market" => parse_place_market(&tokens),
        "cancel-order" => parse_cancel_order(&tokens),
        "register-market" => parse_register_market(&tokens),
        _ => Err(ParseError::parser(
            ParseErrorCode::UnknownCommand,
            "Unknown command",
            tokens[0].index,
        )),
    }
}

fn expect_argument_count(tokens: &[Token], count: usize) -> Result<(), ParseError> {
    if tokens.len() < count {
        return Err(ParseError::parser(
            ParseErrorCode::MissingArgument,
            "Missing argument",
            tokens.first().map_or(0, |t| t.index),
        ));
    }
    if tokens.len() > count {
        return Err(ParseError::parser(
            ParseErrorCode::TooManyArguments,
            "Too many arguments",
            tokens[count].index,
        ));
    }
    Ok(())
}

fn validate_name(token: &Token) -> Result<String, ParseError> {
    let name_ok = token
        .text
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ');

    if !name_ok {
        return Err(ParseError::parser(
            ParseErrorCode::InvalidName,
            "A name must contain only alphabetic characters and spaces",
            token.index,
        ));
    }
    Ok(token.text.clone())
}

fn validate_u64(token: &Token, what: &str) -> Result<u64, ParseError> {
    if token.text.is_empty() || !token.text.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::parser(
            ParseErrorCode::InvalidId,
            format!("{what} must contain only digits"),
            token.index,
        ));
    }

    token.text.parse::<u64>().map_err(|_| {
        ParseError::parser(
            ParseErrorCode::InvalidId,
            format!("{what} does not fit in 64 bits"),
            token.index,
        )
    })
}

fn validate_i64(token: &Token, what: &str) -> Result<i64, ParseError> {
    let digits = token.text.strip_prefix('-').unwrap_or(&token.text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::parser(
            ParseErrorCode::InvalidNumber,
            format!("{what} must contain only digits"),
            token.index,
        ));
    }

    token.text.parse::<i64>().map_err(|_| {
        ParseError::parser(
            ParseErrorCode::InvalidNumber,
            format!("{what} does not fit in a signed 64-bit integer"),
            token.index,
        )
    })
}

fn validate_user_id(token: &Token) -> Result<UserId, ParseError> {
    validate_u64(token, "User id").map(UserId::new)
}

fn validate_order_id(token: &Token) -> Result<OrderId, ParseError> {
    validate_u64(token, "Order id").map(OrderId::new)
}

fn validate_quantity(token: &Token) -> Result<Quantity, ParseError> {
    validate_i64(token, "Quantity").map(Quantity::new)
}

fn validate_price(token: &Token) -> Result<Price, ParseError> {
    validate_i64(token, "Price").map(Price::new)
}

fn validate_asset_text(text: &str, column: usize) -> Result<Asset, ParseError> {
    if text.len() < 3 || text.len() > 10 {
        return Err(ParseError::parser(
            ParseErrorCode::InvalidAsset,
            "Asset must contain 3-10 letters",
            column,
        ));
    }
    if !text.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ParseError::parser(
            ParseErrorCode::InvalidAsset,
            "Asset must contain only A-Z letters",
            column,
        ));
    }
    Ok(Asset::new(text))
}

fn validate_asset(token: &Token) -> Result<Asset, ParseError> {
    validate_asset_text(&token.text, token.index)
}

fn validate_market(token: &Token) -> Result<Market, ParseError> {
    let invalid_format = || {
        ParseError::parser(
            ParseErrorCode::InvalidMarket,
            "Market must be in format <base>/<quote>",
            token.index,
        )
    };

    let Some(slash) = token.text.find('/') else {
        return Err(invalid_format());
    };
    if token.text[slash + 1..].contains('/') {
        return Err(invalid_format());
    }

    let base = validate_asset_text(&token.text[..slash], token.index)?;
    let quote = validate_asset_text(&token.text[slash + 1..], token.index + slash + 1)?;

    if base == quote {
        return Err(ParseError::parser(
            ParseErrorCode::InvalidMarket,
            "Market base and quote must be different assets",
            token.index,
        ));
    }

    Ok(Market::new(base, quote))
}

fn validate_side(token: &Token) -> Result<Side, ParseError> {
    if token.text.eq_ignore_ascii_case("buy") {
        Ok(Side::Buy)
    } else if token.text.eq_ignore_ascii_case("sell") {
        Ok(Side::Sell)
    } else {
        Err(ParseError::parser(
            ParseErrorCode::InvalidSide,
            "Side must be buy or sell",
            token.index,
        ))
    }
}

fn parse_create_user(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 2)?;
    let name = validate_name(&tokens[1])?;
    Ok(Command::CreateUser { name })
}

fn parse_get_user(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 2)?;
    let user_id = validate_user_id(&tokens[1])?;
    Ok(Command::GetUser { user_id })
}

fn parse_deposit(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 4)?;
    let user_id = validate_user_id(&tokens[1])?;
    let asset = validate_asset(&tokens[2])?;
    let quantity = validate_quantity(&tokens[3])?;
    Ok(Command::Deposit {
        user_id,
        asset,
        quantity,
    })
}

fn parse_withdraw(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 4)?;
    let user_id = validate_user_id(&tokens[1])?;
    let asset = validate_asset(&tokens[2])?;
    let quantity = validate_quantity(&tokens[3])?;
    Ok(Command::Withdraw {
        user_id,
        asset,
        quantity,
    })
}

fn parse_free_balance(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 3)?;
    let user_id = validate_user_id(&tokens[1])?;
    let asset = validate_asset(&tokens[2])?;
    Ok(Command::FreeBalance { user_id, asset })
}

fn parse_reserved_balance(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 3)?;
    let user_id = validate_user_id(&tokens[1])?;
    let asset = validate_asset(&tokens[2])?;
    Ok(Command::ReservedBalance { user_id, asset })
}

fn parse_place_limit(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 6)?;
    let user_id = validate_user_id(&tokens[1])?;
    let market = validate_market(&tokens[2])?;
    let side = validate_side(&tokens[3])?;
    let price = validate_price(&tokens[4])?;
    let quantity = validate_quantity(&tokens[5])?;
    Ok(Command::PlaceLimit {
        user_id,
        market,
        side,
        price,
        quantity,
    })
}

fn parse_place_market(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 5)?;
    let user_id = validate_user_id(&tokens[1])?;
    let market = validate_market(&tokens[2])?;
    let side = validate_side(&tokens[3])?;
    let quantity = validate_quantity(&tokens[4])?;
    Ok(Command::PlaceMarket {
        user_id,
        market,
        side,
        quantity,
    })
}

fn parse_cancel_order(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 3)?;
    let user_id = validate_user_id(&tokens[1])?;
    let order_id = validate_order_id(&tokens[2])?;
    Ok(Command::CancelOrder { user_id, order_id })
}

fn parse_register_market(tokens: &[Token]) -> Result<Command, ParseError> {
    expect_argument_count(tokens, 2)?;
    let market = validate_market(&tokens[1])?;
    Ok(Command::RegisterMarket { market })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help_and_exit() {
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("exit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_help_with_arguments_rejected() {
        let error = parse_command("help me").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::TooManyArguments);
    }

    #[test]
    fn test_unknown_command() {
        let error = parse_command("frobnicate 1").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::UnknownCommand);
        assert_eq!(error.column, 0);
    }

    #[test]
    fn test_parse_create_user() {
        assert_eq!(
            parse_command("create-user Alice").unwrap(),
            Command::CreateUser {
                name: "Alice".to_string()
            }
        );
        assert_eq!(
            parse_command("create-user \"Alice Smith\"").unwrap(),
            Command::CreateUser {
                name: "Alice Smith".to_string()
            }
        );
    }

    #[test]
    fn test_create_user_rejects_digits_in_name() {
        let error = parse_command("create-user Alice99").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidName);
    }

    #[test]
    fn test_parse_get_user() {
        assert_eq!(
            parse_command("get-user 7").unwrap(),
            Command::GetUser {
                user_id: UserId::new(7)
            }
        );
    }

    #[test]
    fn test_user_id_must_be_digits() {
        let error = parse_command("get-user seven").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidId);

        let error = parse_command("get-user -1").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidId);
    }

    #[test]
    fn test_user_id_overflow() {
        let error = parse_command("get-user 99999999999999999999").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidId);
    }

    #[test]
    fn test_parse_deposit() {
        assert_eq!(
            parse_command("deposit 1 usdt 1000").unwrap(),
            Command::Deposit {
                user_id: UserId::new(1),
                asset: Asset::new("USDT"),
                quantity: Quantity::new(1000),
            }
        );
    }

    #[test]
    fn test_deposit_argument_count() {
        let error = parse_command("deposit 1 USDT").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::MissingArgument);

        let error = parse_command("deposit 1 USDT 1000 extra").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::TooManyArguments);
    }

    #[test]
    fn test_negative_quantity_parses() {
        // range rules are the exchange's job; the parser only checks shape
        assert_eq!(
            parse_command("deposit 1 USDT -5").unwrap(),
            Command::Deposit {
                user_id: UserId::new(1),
                asset: Asset::new("USDT"),
                quantity: Quantity::new(-5),
            }
        );
    }

    #[test]
    fn test_asset_length_limits() {
        let error = parse_command("deposit 1 ab 10").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidAsset);

        let error = parse_command("deposit 1 abcdefghijk 10").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidAsset);

        let error = parse_command("deposit 1 usd1 10").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidAsset);
    }

    #[test]
    fn test_parse_place_limit() {
        assert_eq!(
            parse_command("place-limit 1 BTC/USDT buy 95000 2").unwrap(),
            Command::PlaceLimit {
                user_id: UserId::new(1),
                market: Market::new(Asset::new("BTC"), Asset::new("USDT")),
                side: Side::Buy,
                price: Price::new(95000),
                quantity: Quantity::new(2),
            }
        );
    }

    #[test]
    fn test_side_is_case_insensitive() {
        let Command::PlaceLimit { side, .. } =
            parse_command("place-limit 1 BTC/USDT SELL 100 1").unwrap()
        else {
            panic!("expected place-limit");
        };
        assert_eq!(side, Side::Sell);
    }

    #[test]
    fn test_invalid_side() {
        let error = parse_command("place-limit 1 BTC/USDT hold 100 1").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidSide);
    }

    #[test]
    fn test_market_needs_exactly_one_slash() {
        let error = parse_command("register-market BTCUSDT").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidMarket);

        let error = parse_command("register-market BTC/USDT/ETH").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidMarket);
    }

    #[test]
    fn test_market_assets_must_differ() {
        let error = parse_command("register-market BTC/btc").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidMarket);
    }

    #[test]
    fn test_market_asset_rules_apply_to_both_sides() {
        let error = parse_command("register-market BT/USDT").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidAsset);

        let error = parse_command("register-market BTC/US").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidAsset);
    }

    #[test]
    fn test_parse_place_market() {
        assert_eq!(
            parse_command("place-market 1 BTC/USDT sell 3").unwrap(),
            Command::PlaceMarket {
                user_id: UserId::new(1),
                market: Market::new(Asset::new("BTC"), Asset::new("USDT")),
                side: Side::Sell,
                quantity: Quantity::new(3),
            }
        );
    }

    #[test]
    fn test_parse_cancel_order() {
        assert_eq!(
            parse_command("cancel-order 1 42").unwrap(),
            Command::CancelOrder {
                user_id: UserId::new(1),
                order_id: OrderId::new(42),
            }
        );
    }

    #[test]
    fn test_error_column_points_at_offending_token() {
        let error = parse_command("deposit 1 USDT nine").unwrap_err();
        assert_eq!(error.code, ParseErrorCode::InvalidNumber);
        assert_eq!(error.column, 15);
    }
}
