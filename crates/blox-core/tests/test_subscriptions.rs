//! Wiring: subscribe, unsubscribe and block removal keep both ends in step

use blox_core::prelude::*;
use blox_core::PortDirection;
use serde_json::json;

fn chain() -> (Blox, BlockId, BlockId, BlockId) {
    let mut blox = Blox::new();
    let a = blox.add(PassThrough);
    let b = blox.add(PassThrough);
    let c = blox.add(PassThrough);
    blox.subscribe(b, "In", a, "Out").unwrap();
    blox.subscribe(c, "In", b, "Out").unwrap();
    (blox, a, b, c)
}

#[test]
fn test_duplicate_subscription_is_ignored() {
    let mut blox = Blox::new();
    let data = blox.add(Data::new(json!(1)));
    let add = blox.add(Add);

    let first = blox.subscribe(add, Add::VALUES, data, Data::OUTPUT).unwrap();
    let second = blox.publish(data, Data::OUTPUT, add, Add::VALUES).unwrap();

    assert_eq!(first, second);
    assert_eq!(blox.subscription_count(), 1);
    assert_eq!(blox.node(data).unwrap().subscribers(Data::OUTPUT), &[first]);
    assert_eq!(blox.node(add).unwrap().subscriptions(Add::VALUES), &[first]);
}

#[test]
fn test_one_publisher_may_feed_two_inputs() {
    let mut blox = Blox::new();
    let data = blox.add(Data::new(json!(1)));
    let compare = blox.add(Compare);

    let values = blox.subscribe(compare, Compare::VALUES, data, Data::OUTPUT).unwrap();
    let other = blox
        .subscribe(compare, Compare::COMPARE_TO, data, Data::OUTPUT)
        .unwrap();

    assert_ne!(values, other);
    assert_eq!(blox.node(data).unwrap().subscribers(Data::OUTPUT), &[values, other]);
}

#[test]
fn test_subscribe_rejects_unknown_ports() {
    let mut blox = Blox::new();
    let data = blox.add(Data::new(json!(1)));
    let add = blox.add(Add);

    let err = blox.subscribe(add, "Missing", data, Data::OUTPUT).unwrap_err();
    assert!(matches!(
        err,
        BloxError::InvalidPort { direction: PortDirection::Input, .. }
    ));

    let err = blox.subscribe(add, Add::VALUES, data, "Missing").unwrap_err();
    assert!(matches!(
        err,
        BloxError::InvalidPort { direction: PortDirection::Output, .. }
    ));

    assert_eq!(blox.subscription_count(), 0);
    assert!(!blox.is_subscriber(add, None, None).unwrap());
}

#[test]
fn test_unsubscribe_updates_both_ends() {
    let mut blox = Blox::new();
    let a = blox.add(Data::new(json!(1)));
    let b = blox.add(Data::new(json!(2)));
    let add = blox.add(Add);
    blox.subscribe(add, Add::VALUES, a, Data::OUTPUT).unwrap();
    let kept = blox.subscribe(add, Add::VALUES, b, Data::OUTPUT).unwrap();

    let removed = blox.unsubscribe(add, Add::VALUES, Some(a), None).unwrap();

    assert_eq!(removed, 1);
    assert!(blox.node(a).unwrap().subscribers(Data::OUTPUT).is_empty());
    assert_eq!(blox.node(b).unwrap().subscribers(Data::OUTPUT), &[kept]);
    assert_eq!(blox.node(add).unwrap().subscriptions(Add::VALUES), &[kept]);
    assert!(!blox.is_subscriber(add, Some(a), None).unwrap());
    assert!(blox.is_subscriber(add, Some(b), None).unwrap());
}

#[test]
fn test_unsubscribe_filters_are_conjunctive() {
    let mut blox = Blox::new();
    let a = blox.add(Data::new(json!(1)));
    let b = blox.add(Data::new(json!(2)));
    let add = blox.add(Add);
    blox.subscribe(add, Add::VALUES, a, Data::OUTPUT).unwrap();
    blox.subscribe(add, Add::VALUES, b, Data::OUTPUT).unwrap();

    // right publisher, wrong port
    assert_eq!(blox.unsubscribe(add, Add::VALUES, Some(a), Some("Out")).unwrap(), 0);
    assert_eq!(blox.subscription_count(), 2);

    // no filters drops everything on the input
    assert_eq!(blox.unsubscribe(add, Add::VALUES, None, None).unwrap(), 2);
    assert_eq!(blox.subscription_count(), 0);
    assert!(!blox.is_subscriber(add, None, None).unwrap());
}

#[test]
fn test_unsubscribe_rejects_unknown_input() {
    let (mut blox, _, b, _) = chain();
    assert!(matches!(
        blox.unsubscribe(b, "Missing", None, None),
        Err(BloxError::InvalidPort { .. })
    ));
    assert_eq!(blox.subscription_count(), 2);
}

#[test]
fn test_remove_block_tears_down_its_edges() {
    let (mut blox, a, b, c) = chain();

    blox.remove(b).unwrap();

    assert_eq!(blox.subscription_count(), 0);
    assert!(blox.node(a).unwrap().subscribers("Out").is_empty());
    assert!(blox.node(c).unwrap().subscriptions("In").is_empty());
    assert_eq!(blox.block_ids(), &[a, c]);
    assert!(!blox.contains(b));
    assert!(matches!(blox.node(b), Err(BloxError::UnknownBlock(id)) if id == b));
    assert!(matches!(
        blox.subscribe(b, "In", a, "Out"),
        Err(BloxError::UnknownBlock(_))
    ));
}

#[test]
fn test_removed_block_ids_are_not_reused() {
    let (mut blox, _, b, _) = chain();
    blox.remove(b).unwrap();
    let fresh = blox.add(PassThrough);
    assert_ne!(fresh, b);
    assert_eq!(blox.len(), 3);
}

#[test]
fn test_input_through_foreign_subscription_is_rejected() {
    let mut blox = Blox::new();
    let a = blox.add(PassThrough);
    let b = blox.add(PassThrough);
    let stranger = blox.add(PassThrough);
    let edge = blox.subscribe(b, "In", a, "Out").unwrap();

    let err = blox.input(stranger, edge, json!(1)).unwrap_err();
    match err {
        BloxError::SubscriberMismatch { block, subscription, expected } => {
            assert_eq!(block, stranger);
            assert_eq!(subscription, edge);
            assert_eq!(expected, b);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!blox.node(stranger).unwrap().has_value("In").unwrap());
    assert!(blox.receivers().is_empty());
}

#[test]
fn test_input_is_buffered_last_in_first_out() {
    let mut blox = Blox::new();
    let a = blox.add(PassThrough);
    let b = blox.add(PassThrough);
    let edge = blox.subscribe(b, "In", a, "Out").unwrap();

    blox.input(b, edge, json!(1)).unwrap();
    blox.input(b, edge, json!(2)).unwrap();

    assert_eq!(blox.receivers(), &[b]);
    let node = blox.node_mut(b).unwrap();
    assert_eq!(node.pop_value("In").unwrap(), Some(json!(2)));
    assert_eq!(node.pop_value("In").unwrap(), Some(json!(1)));
    assert_eq!(node.pop_value("In").unwrap(), None);
}
