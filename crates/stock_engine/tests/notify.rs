use std::sync::{mpsc, Arc};

use pretty_assertions::assert_eq;
use stock_engine::{
    ChannelNotifier, FanoutNotifier, LogNotifier, NotificationSink, StockNotification,
};

fn widget() -> StockNotification {
    StockNotification {
        url: "https://shop.example/p1".into(),
        domain: "shop.example".into(),
        product: "widget".into(),
    }
}

#[test]
fn channel_notifier_forwards_notifications() {
    let (tx, rx) = mpsc::channel();
    ChannelNotifier::new(tx).notify(&widget());
    assert_eq!(rx.try_recv().unwrap(), widget());
}

#[test]
fn channel_notifier_survives_a_closed_receiver() {
    stock_logging::initialize_for_tests();
    let (tx, rx) = mpsc::channel();
    drop(rx);
    ChannelNotifier::new(tx).notify(&widget());
}

#[test]
fn fanout_delivers_to_every_sink() {
    stock_logging::initialize_for_tests();
    let (first_tx, first_rx) = mpsc::channel();
    let (second_tx, second_rx) = mpsc::channel();

    let mut fanout = FanoutNotifier::new(vec![
        Arc::new(LogNotifier),
        Arc::new(ChannelNotifier::new(first_tx)),
    ]);
    fanout.push(Arc::new(ChannelNotifier::new(second_tx)));
    fanout.notify(&widget());

    assert_eq!(first_rx.try_recv().unwrap(), widget());
    assert_eq!(second_rx.try_recv().unwrap(), widget());
}
