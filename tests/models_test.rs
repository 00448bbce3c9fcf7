//! Deserialization tests for feed message models.

use rust_decimal_macros::dec;

use depthview::DepthviewError;
use depthview::models::{FeedMessage, OrderState, Side};

const ORDER_JSON: &str = include_str!("fixtures/order.json");
const TRADE_JSON: &str = include_str!("fixtures/trade.json");
const BALANCE_JSON: &str = include_str!("fixtures/balance.json");

#[test]
fn test_order_message_parses() {
    let message = FeedMessage::parse(ORDER_JSON).expect("Failed to parse order message");

    let FeedMessage::Order(order) = message else {
        panic!("expected an order message");
    };
    assert_eq!(order.order_id, 5);
    assert_eq!(order.order_type, Side::Ask);
    assert_eq!(order.price, dec!(100.0000));
    assert_eq!(order.amount, dec!(2.0000));
    assert_eq!(order.state, OrderState::Open);
    assert!(!order.is_removal());
}

#[test]
fn test_trade_message_parses() {
    let message = FeedMessage::parse(TRADE_JSON).expect("Failed to parse trade message");

    let FeedMessage::Trade(trade) = message else {
        panic!("expected a trade message");
    };
    assert_eq!(trade.trade_id, 17);
    assert_eq!(trade.trade_time, "2017-03-04 12:00:00");
    assert_eq!(trade.trade_type, "bid");
    assert_eq!(trade.price, dec!(0.0150));
    assert_eq!(trade.amount, dec!(3.5000));
    assert_eq!(trade.initiating_id, 9);
    assert_eq!(trade.existing_id, 4);
}

#[test]
fn test_balance_message_parses() {
    let message = FeedMessage::parse(BALANCE_JSON).expect("Failed to parse balance message");

    let FeedMessage::Balance(balance) = message else {
        panic!("expected a balance message");
    };
    assert_eq!(balance.currency, "btc");
    assert_eq!(balance.balance, dec!(1.2345));
}

#[test]
fn test_numeric_price_and_amount_also_parse() {
    let raw = r#"{"message_type":"order","order_id":1,"order_type":"bid","price":10.5,"amount":2,"state":"open"}"#;
    let message = FeedMessage::parse(raw).expect("numeric fields should parse");

    let FeedMessage::Order(order) = message else {
        panic!("expected an order message");
    };
    assert_eq!(order.price, dec!(10.5));
    assert_eq!(order.amount, dec!(2));
}

#[test]
fn test_terminal_states_flag_removal() {
    for state in ["complete", "cancelled"] {
        let raw = format!(
            r#"{{"message_type":"order","order_id":1,"order_type":"bid","price":"1","amount":"1","state":"{state}"}}"#
        );
        let FeedMessage::Order(order) = FeedMessage::parse(&raw).expect("should parse") else {
            panic!("expected an order message");
        };
        assert!(order.is_removal(), "state {state} should remove");
    }
}

#[test]
fn test_partial_state_is_not_terminal() {
    let raw = r#"{"message_type":"order","order_id":1,"order_type":"bid","price":"1","amount":"0.5","state":"partial"}"#;
    let FeedMessage::Order(order) = FeedMessage::parse(raw).expect("should parse") else {
        panic!("expected an order message");
    };
    assert!(!order.is_removal());
}

#[test]
fn test_zero_amount_flags_removal() {
    let raw = r#"{"message_type":"order","order_id":1,"order_type":"bid","price":"1","amount":"0","state":"open"}"#;
    let FeedMessage::Order(order) = FeedMessage::parse(raw).expect("should parse") else {
        panic!("expected an order message");
    };
    assert!(order.is_removal());
}

#[test]
fn test_unknown_message_type_is_preserved_not_rejected() {
    let message = FeedMessage::parse(r#"{"message_type":"ping"}"#).expect("should not error");

    assert!(matches!(
        message,
        FeedMessage::Unknown { ref message_type } if message_type == "ping"
    ));
}

#[test]
fn test_missing_discriminator_is_malformed() {
    let err = FeedMessage::parse(r#"{"order_id": 5}"#).unwrap_err();
    assert!(matches!(err, DepthviewError::MalformedMessage(_)));
}

#[test]
fn test_invalid_json_is_malformed() {
    let err = FeedMessage::parse("not json").unwrap_err();
    assert!(matches!(err, DepthviewError::MalformedMessage(_)));
}

#[test]
fn test_known_type_with_missing_fields_is_malformed() {
    let err = FeedMessage::parse(r#"{"message_type":"order","order_id":5}"#).unwrap_err();
    assert!(matches!(err, DepthviewError::MalformedMessage(_)));
}

#[test]
fn test_bad_side_is_malformed() {
    let raw = r#"{"message_type":"order","order_id":1,"order_type":"buy","price":"1","amount":"1","state":"open"}"#;
    let err = FeedMessage::parse(raw).unwrap_err();
    assert!(matches!(err, DepthviewError::MalformedMessage(_)));
}
