#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_application::ports::{
    Do53Forwarder, DohForwarder, DohQuery, RandomSource, UpstreamReply,
};
use doh_relay_domain::{DnsMessage, DomainError};
use futures::stream::{self, StreamExt};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Replays a fixed sequence of indices, wrapping around.
pub struct SequenceRandom {
    sequence: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn always(index: usize) -> Self {
        Self::new(vec![index])
    }
}

impl RandomSource for SequenceRandom {
    fn pick_index(&self, len: usize) -> usize {
        let position = self.cursor.fetch_add(1, Ordering::Relaxed) % self.sequence.len();
        self.sequence[position] % len
    }
}

pub struct MockDo53Forwarder {
    reply: Mutex<Result<Vec<u8>, DomainError>>,
    calls: Mutex<Vec<(IpAddr, Vec<u8>)>>,
}

impl MockDo53Forwarder {
    pub fn replying(reply: &[u8]) -> Self {
        Self {
            reply: Mutex::new(Ok(reply.to_vec())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            reply: Mutex::new(Err(error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(IpAddr, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Do53Forwarder for MockDo53Forwarder {
    async fn forward(&self, message: &DnsMessage, address: IpAddr) -> Result<Bytes, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((address, message.as_bytes().to_vec()));
        self.reply.lock().unwrap().clone().map(Bytes::from)
    }
}

pub struct MockDohForwarder {
    status: u16,
    headers: Vec<(String, String)>,
    chunks: Result<Vec<Vec<u8>>, DomainError>,
    calls: Mutex<Vec<DohQuery>>,
}

impl MockDohForwarder {
    pub fn replying(status: u16, chunks: Vec<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            chunks: Ok(chunks),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            status: 0,
            headers: Vec::new(),
            chunks: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<DohQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DohForwarder for MockDohForwarder {
    async fn forward(&self, query: DohQuery) -> Result<UpstreamReply, DomainError> {
        self.calls.lock().unwrap().push(query);
        let chunks = self.chunks.clone()?;
        Ok(UpstreamReply {
            status: self.status,
            headers: self.headers.clone(),
            body: stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c)))).boxed(),
        })
    }
}

/// Drains a streamed reply body.
pub async fn collect_body(reply: UpstreamReply) -> Result<Vec<u8>, DomainError> {
    let mut body = reply.body;
    let mut collected = Vec::new();
    while let Some(chunk) = body.next().await {
        collected.extend_from_slice(&chunk?);
    }
    Ok(collected)
}
