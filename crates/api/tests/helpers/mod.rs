#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_api::{create_relay_routes, AppState};
use doh_relay_application::ports::{
    Do53Forwarder, DohForwarder, DohQuery, RandomSource, UpstreamReply,
};
use doh_relay_application::use_cases::{RelayDnsQueryUseCase, ResolveUpstreamUseCase};
use doh_relay_domain::{DnsMessage, DomainError, ProviderRegistry};
use futures::stream::{self, StreamExt};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

pub struct FirstMember;

impl RandomSource for FirstMember {
    fn pick_index(&self, _len: usize) -> usize {
        0
    }
}

pub struct StubDo53 {
    reply: Result<Vec<u8>, DomainError>,
    calls: Mutex<Vec<(IpAddr, Vec<u8>)>>,
}

impl StubDo53 {
    pub fn replying(reply: &[u8]) -> Self {
        Self {
            reply: Ok(reply.to_vec()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            reply: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(IpAddr, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Do53Forwarder for StubDo53 {
    async fn forward(&self, message: &DnsMessage, address: IpAddr) -> Result<Bytes, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((address, message.as_bytes().to_vec()));
        self.reply.clone().map(Bytes::from)
    }
}

pub struct StubDoh {
    status: u16,
    headers: Vec<(String, String)>,
    chunks: Result<Vec<Vec<u8>>, DomainError>,
    calls: Mutex<Vec<DohQuery>>,
}

impl StubDoh {
    pub fn replying(status: u16, chunks: Vec<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            chunks: Ok(chunks),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            status: 0,
            headers: Vec::new(),
            chunks: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_headers(mut self, headers: &[(&str, &str)]) -> Self {
        self.headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn calls(&self) -> Vec<DohQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DohForwarder for StubDoh {
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

pub fn app_state(do53: Arc<StubDo53>, doh: Arc<StubDoh>, max_body_bytes: usize) -> AppState {
    let resolver = ResolveUpstreamUseCase::new(
        Arc::new(ProviderRegistry::builtin()),
        Arc::new(FirstMember),
    );
    AppState {
        relay: Arc::new(RelayDnsQueryUseCase::new(Arc::new(resolver), do53, doh)),
        max_body_bytes,
    }
}

pub fn router(do53: Arc<StubDo53>, doh: Arc<StubDoh>) -> axum::Router {
    create_relay_routes(app_state(do53, doh, 65_535))
}
