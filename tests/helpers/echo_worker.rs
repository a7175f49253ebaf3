use crate::broker::{Broker, Message, Route};
use crate::engine::types::{BestFlight, SearchReply, SubQuery};
use std::collections::BTreeSet;
use tokio::task::JoinHandle;

pub fn direct_reply(query: SubQuery, price: f64) -> SearchReply {
    SearchReply {
        direct: Some(BestFlight {
            price,
            airlines: BTreeSet::from(["Iberia".to_string()]),
        }),
        with_stops: None,
        query,
    }
}

/// Stands in for the maker/poller pipeline: answers every search request
/// directly, pricing the n-th request from `prices[n % len]`.
pub fn spawn_echo_worker(broker: &Broker, prices: Vec<f64>) -> JoinHandle<()> {
    let consumer = broker.consumer(Route::SearchRequest);
    let broker = broker.clone();
    tokio::spawn(async move {
        let mut n = 0;
        while let Some(delivery) = consumer.next().await {
            let message = delivery.message();
            let query: SubQuery = message.decode().expect("sub-query body");
            let reply_to = message.reply_to().cloned().expect("reply destination");

            let reply = Message::json(
                message.correlation_id().clone(),
                None,
                &direct_reply(query, prices[n % prices.len()]),
            )
            .expect("encode reply");
            broker.reply(&reply_to, reply).await.expect("reply");
            delivery.ack();
            n += 1;
        }
    })
}
