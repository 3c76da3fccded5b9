use std::sync::{mpsc, Arc};

use serde::Serialize;
use stock_logging::{stock_info, stock_warn};

/// Raised when a monitored product comes back in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockNotification {
    pub url: String,
    pub domain: String,
    pub product: String,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &StockNotification);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notification: &StockNotification) {
        stock_info!(
            "Site {} has {} in stock! ({})",
            notification.domain,
            notification.product,
            notification.url
        );
    }
}

pub struct ChannelNotifier {
    tx: mpsc::Sender<StockNotification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::Sender<StockNotification>) -> Self {
        Self { tx }
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, notification: &StockNotification) {
        if self.tx.send(notification.clone()).is_err() {
            stock_warn!(
                "Notification receiver is gone; dropped notice for {} ({})",
                notification.domain,
                notification.url
            );
        }
    }
}

/// Delivers to every sink, in order.
#[derive(Default)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutNotifier {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }
}

impl NotificationSink for FanoutNotifier {
    fn notify(&self, notification: &StockNotification) {
        for sink in &self.sinks {
            sink.notify(notification);
        }
    }
}
