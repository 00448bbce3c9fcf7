//! Behavioral tests for the order-book view synchronizer.

use rust_decimal_macros::dec;

use depthview::DepthviewError;
use depthview::view::{OrderBookView, Region, RenderOp, RowPosition};

fn order(id: u64, side: &str, price: &str, amount: &str, state: &str) -> String {
    format!(
        r#"{{"message_type":"order","order_id":{id},"order_type":"{side}","price":"{price}","amount":"{amount}","state":"{state}"}}"#
    )
}

fn trade(id: u64, price: &str, amount: &str) -> String {
    format!(
        r#"{{"message_type":"trade","trade_id":{id},"trade_time":"2017-03-04 12:00:00","trade_type":"bid","price":"{price}","amount":"{amount}","initiating_id":1,"existing_id":2}}"#
    )
}

fn apply(view: &mut OrderBookView, raw: &str) -> Vec<RenderOp> {
    view.apply_text(raw).expect("message should apply")
}

#[test]
fn order_is_inserted_then_removed_when_amount_hits_zero() {
    let mut view = OrderBookView::new();

    let ops = apply(&mut view, &order(5, "ask", "100.0000", "2.0000", "open"));
    assert!(view.contains_order(5));
    assert!(matches!(
        &ops[0],
        RenderOp::InsertRow { region: Region::AskOrders, key, position: RowPosition::Append, .. }
            if key == "order_5"
    ));

    let ops = apply(&mut view, &order(5, "ask", "100.0000", "0", "open"));
    assert!(!view.contains_order(5));
    assert!(view.asks().is_empty());
    assert!(ops.iter().any(|op| matches!(
        op,
        RenderOp::RemoveRow { region: Region::AskOrders, key } if key == "order_5"
    )));
}

#[test]
fn terminal_state_removes_regardless_of_amount() {
    for state in ["complete", "cancelled"] {
        let mut view = OrderBookView::new();
        apply(&mut view, &order(7, "bid", "10", "3", "open"));
        apply(&mut view, &order(7, "bid", "10", "3", state));
        assert!(!view.contains_order(7), "state {state} should remove");
        assert!(view.bids().is_empty());
    }
}

#[test]
fn final_amount_and_total_reflect_last_non_terminal_message() {
    let mut view = OrderBookView::new();
    apply(&mut view, &order(3, "bid", "2.5000", "4.0000", "open"));
    let ops = apply(&mut view, &order(3, "bid", "2.5000", "1.5000", "partial"));

    assert_eq!(view.bids()[0].amount, dec!(1.5000));
    assert_eq!(view.bids()[0].total(), dec!(3.7500));
    assert!(ops.contains(&RenderOp::UpdateCell {
        key: "order_3_amount".to_string(),
        text: "1.5000".to_string(),
    }));
    assert!(ops.contains(&RenderOp::UpdateCell {
        key: "order_3_total".to_string(),
        text: "3.7500".to_string(),
    }));
}

#[test]
fn ask_side_stays_ascending_and_bid_side_descending() {
    let mut view = OrderBookView::new();
    let mut id = 0;
    for price in ["103", "101", "105", "102", "104"] {
        id += 1;
        apply(&mut view, &order(id, "ask", price, "1", "open"));
        apply(&mut view, &order(id + 100, "bid", price, "1", "open"));
    }

    let ask_prices: Vec<_> = view.asks().iter().map(|e| e.price).collect();
    let mut sorted = ask_prices.clone();
    sorted.sort();
    assert_eq!(ask_prices, sorted);

    let bid_prices: Vec<_> = view.bids().iter().map(|e| e.price).collect();
    let mut sorted = bid_prices.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(bid_prices, sorted);
}

#[test]
fn insertion_before_emits_the_anchor_row_key() {
    let mut view = OrderBookView::new();
    apply(&mut view, &order(1, "ask", "105", "1", "open"));
    let ops = apply(&mut view, &order(2, "ask", "100", "1", "open"));

    assert!(matches!(
        &ops[0],
        RenderOp::InsertRow { position: RowPosition::Before(anchor), .. } if anchor == "order_1"
    ));
    assert_eq!(view.asks()[0].order_id, 2);
}

#[test]
fn multi_digit_prices_compare_numerically_not_lexicographically() {
    let mut view = OrderBookView::new();
    // "9" > "10" lexicographically; numerically 9 < 10.
    apply(&mut view, &order(1, "ask", "9", "1", "open"));
    apply(&mut view, &order(2, "ask", "10", "1", "open"));

    let ids: Vec<_> = view.asks().iter().map(|e| e.order_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn removal_for_an_unseen_order_is_a_no_op() {
    let mut view = OrderBookView::new();
    let ops = apply(&mut view, &order(9, "ask", "1", "0", "open"));
    assert!(ops.is_empty());
    assert!(view.asks().is_empty());
}

#[test]
fn trades_render_most_recent_first() {
    let mut view = OrderBookView::new();
    apply(&mut view, &trade(1, "1.0000", "1.0000"));
    let ops = apply(&mut view, &trade(2, "2.0000", "1.0000"));

    let ids: Vec<_> = view.trades().map(|t| t.trade_id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert!(matches!(
        &ops[0],
        RenderOp::InsertRow { region: Region::Trades, key, position: RowPosition::Top, .. }
            if key == "trade_2"
    ));
}

#[test]
fn duplicate_trade_is_dropped_without_ops() {
    let mut view = OrderBookView::new();
    apply(&mut view, &trade(1, "1.0000", "1.0000"));
    let ops = apply(&mut view, &trade(1, "1.0000", "1.0000"));

    assert!(ops.is_empty());
    assert_eq!(view.trades().count(), 1);
}

#[test]
fn trade_history_is_bounded_and_evicts_the_oldest() {
    let mut view = OrderBookView::with_trade_capacity(2);
    apply(&mut view, &trade(1, "1.0000", "1.0000"));
    apply(&mut view, &trade(2, "1.0000", "1.0000"));
    let ops = apply(&mut view, &trade(3, "1.0000", "1.0000"));

    let ids: Vec<_> = view.trades().map(|t| t.trade_id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert!(ops.contains(&RenderOp::RemoveRow {
        region: Region::Trades,
        key: "trade_1".to_string(),
    }));
}

#[test]
fn trade_row_cells_carry_formatted_values() {
    let mut view = OrderBookView::new();
    let ops = apply(&mut view, &trade(4, "0.0150", "3.5000"));

    let RenderOp::InsertRow { cells, .. } = &ops[0] else {
        panic!("expected an insert");
    };
    assert_eq!(
        cells,
        &[
            "2017-03-04 12:00:00",
            "bid",
            "0.0150",
            "3.5000",
            "0.0525",
            "1",
            "2",
        ]
    );
}

#[test]
fn balance_updates_are_last_write_wins() {
    let mut view = OrderBookView::new();
    apply(
        &mut view,
        r#"{"message_type":"balance","currency":"btc","balance":"2.0000"}"#,
    );
    let ops = apply(
        &mut view,
        r#"{"message_type":"balance","currency":"btc","balance":"1.2500"}"#,
    );

    assert_eq!(view.balance("btc"), Some(dec!(1.2500)));
    assert!(ops.contains(&RenderOp::UpdateCell {
        key: "btc_balance".to_string(),
        text: "1.2500".to_string(),
    }));
    assert!(ops.contains(&RenderOp::Flash {
        key: "btc_balance".to_string(),
    }));
}

#[test]
fn unknown_message_type_does_not_mutate_or_error() {
    let mut view = OrderBookView::new();
    apply(&mut view, &order(1, "ask", "10", "1", "open"));

    let ops = view
        .apply_text(r#"{"message_type":"ping"}"#)
        .expect("unknown type must not raise past the boundary");

    assert!(ops.is_empty());
    assert_eq!(view.asks().len(), 1);
}

#[test]
fn malformed_message_errors_and_leaves_the_model_untouched() {
    let mut view = OrderBookView::new();
    apply(&mut view, &order(1, "ask", "10", "1", "open"));

    let err = view.apply_text("{\"order_id\": 2}").unwrap_err();
    assert!(matches!(err, DepthviewError::MalformedMessage(_)));
    assert_eq!(view.asks().len(), 1);
    assert!(!view.contains_order(2));
}

#[test]
fn order_id_is_unique_across_sides() {
    let mut view = OrderBookView::new();
    apply(&mut view, &order(5, "ask", "10", "1", "open"));
    // Later messages for a known id follow the stored side, even if the
    // message claims otherwise.
    apply(&mut view, &order(5, "bid", "10", "0.5", "open"));

    assert!(view.bids().is_empty());
    assert_eq!(view.asks()[0].amount, dec!(0.5));
}

#[test]
fn every_mutation_emits_a_flash_hint() {
    let mut view = OrderBookView::new();

    let insert_ops = apply(&mut view, &order(1, "bid", "10", "1", "open"));
    assert!(insert_ops.iter().any(|op| matches!(op, RenderOp::Flash { .. })));

    let update_ops = apply(&mut view, &order(1, "bid", "10", "0.5", "open"));
    assert!(update_ops.iter().any(|op| matches!(op, RenderOp::Flash { .. })));

    let remove_ops = apply(&mut view, &order(1, "bid", "10", "0", "open"));
    assert!(remove_ops.iter().any(|op| matches!(op, RenderOp::Flash { .. })));
}
