use std::net::SocketAddr;
use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};
use rand::Rng as _;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::timeout;
use tracing::debug;

use super::error::{Mismatch, TrackerError};
use super::response::ScrapeStats;
use crate::constants::{
    ACTION_CONNECT, ACTION_ERROR, ACTION_SCRAPE, CONNECT_PACKET_LEN, INFO_HASH_LEN, PROTOCOL_ID,
    SCRAPE_RECORD_LEN, SCRAPE_REQUEST_HEADER_LEN, SCRAPE_RESPONSE_HEADER_LEN,
};
use crate::info_hash::InfoHash;

const RECV_BUFFER_SIZE: usize = 2048;

/// A UDP socket connected to one tracker together with the connection ID
/// the tracker handed out during the handshake.
#[derive(Debug)]
pub struct UdpTracker {
    socket: UdpSocket,
    addr: SocketAddr,
    connection_id: u64,
    io_timeout: Duration,
}

impl UdpTracker {
    /// Resolves `url`, opens a socket to it and performs the connect
    /// handshake.
    ///
    /// Resolution, send and receive all share one `io_timeout` window.
    pub async fn connect(url: &str, io_timeout: Duration) -> Result<Self, TrackerError> {
        let host = normalize_url(url);

        timeout(io_timeout, Self::do_connect(host, io_timeout))
            .await
            .map_err(|_| TrackerError::Timeout)?
    }

    async fn do_connect(host: &str, io_timeout: Duration) -> Result<Self, TrackerError> {
        let addr = resolve(host).await?;

        let bind_addr = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(addr).await?;

        let transaction_id: u32 = rand::rng().random();
        let request = encode_connect_request(transaction_id);

        socket.send(&request).await?;
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let n = socket.recv(&mut buf).await?;

        let connection_id = decode_connect_response(&buf[..n], transaction_id)?;
        debug!("connected to tracker {} ({})", host, addr);

        Ok(Self {
            socket,
            addr,
            connection_id,
            io_timeout,
        })
    }

    /// Scrapes every hash in one request. Either all hashes get stats, in
    /// request order, or the call fails.
    pub async fn scrape(&self, info_hashes: &[InfoHash]) -> Result<Vec<ScrapeStats>, TrackerError> {
        let transaction_id: u32 = rand::rng().random();
        let request = encode_scrape_request(self.connection_id, transaction_id, info_hashes);
        let expected_len = scrape_response_len(info_hashes.len());

        let response = timeout(self.io_timeout, self.send_and_receive(&request, expected_len))
            .await
            .map_err(|_| TrackerError::Timeout)??;

        decode_scrape_response(&response, transaction_id, info_hashes.len())
    }

    async fn send_and_receive(
        &self,
        request: &[u8],
        expected_len: usize,
    ) -> Result<Vec<u8>, TrackerError> {
        self.socket.send(request).await?;

        let mut buf = vec![0u8; expected_len.max(RECV_BUFFER_SIZE)];
        let n = self.socket.recv(&mut buf).await?;
        buf.truncate(n);
        Ok(buf)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn connection_id(&self) -> u64 {
        self.connection_id
    }
}

/// Strips a case-insensitive `udp://` prefix and one trailing `/`.
pub fn normalize_url(url: &str) -> &str {
    let url = match url.get(..6) {
        Some(scheme) if scheme.eq_ignore_ascii_case("udp://") => &url[6..],
        _ => url,
    };
    url.strip_suffix('/').unwrap_or(url)
}

async fn resolve(host: &str) -> Result<SocketAddr, TrackerError> {
    lookup_host(host)
        .await
        .map_err(|e| TrackerError::AddressResolution(format!("{}: {}", host, e)))?
        .next()
        .ok_or_else(|| TrackerError::AddressResolution(host.to_string()))
}

pub fn encode_connect_request(transaction_id: u32) -> Bytes {
    let mut buf = BytesMut::with_capacity(CONNECT_PACKET_LEN);
    buf.put_u64(PROTOCOL_ID);
    buf.put_u32(ACTION_CONNECT);
    buf.put_u32(transaction_id);
    buf.freeze()
}

/// Validates a connect response and returns the connection ID it carries.
pub fn decode_connect_response(response: &[u8], transaction_id: u32) -> Result<u64, TrackerError> {
    check_error_packet(response, transaction_id)?;

    if response.len() < CONNECT_PACKET_LEN {
        return Err(TrackerError::ShortResponse {
            expected: CONNECT_PACKET_LEN,
            actual: response.len(),
        });
    }

    check_header(response, ACTION_CONNECT, transaction_id)?;

    Ok(u64::from_be_bytes([
        response[8],
        response[9],
        response[10],
        response[11],
        response[12],
        response[13],
        response[14],
        response[15],
    ]))
}

pub fn encode_scrape_request(
    connection_id: u64,
    transaction_id: u32,
    info_hashes: &[InfoHash],
) -> Bytes {
    let mut buf =
        BytesMut::with_capacity(SCRAPE_REQUEST_HEADER_LEN + INFO_HASH_LEN * info_hashes.len());
    buf.put_u64(connection_id);
    buf.put_u32(ACTION_SCRAPE);
    buf.put_u32(transaction_id);
    for info_hash in info_hashes {
        buf.put_slice(info_hash.as_bytes());
    }
    buf.freeze()
}

/// Validates a scrape response and decodes `count` records from it.
pub fn decode_scrape_response(
    response: &[u8],
    transaction_id: u32,
    count: usize,
) -> Result<Vec<ScrapeStats>, TrackerError> {
    check_error_packet(response, transaction_id)?;

    if response.len() < SCRAPE_RESPONSE_HEADER_LEN {
        return Err(TrackerError::ShortResponse {
            expected: SCRAPE_RESPONSE_HEADER_LEN,
            actual: response.len(),
        });
    }

    check_header(response, ACTION_SCRAPE, transaction_id)?;

    let expected = scrape_response_len(count);
    if response.len() < expected {
        return Err(TrackerError::ShortResponse {
            expected,
            actual: response.len(),
        });
    }

    Ok(response[SCRAPE_RESPONSE_HEADER_LEN..expected]
        .chunks_exact(SCRAPE_RECORD_LEN)
        .map(|chunk| {
            let mut record = [0u8; SCRAPE_RECORD_LEN];
            record.copy_from_slice(chunk);
            ScrapeStats::from_record(&record)
        })
        .collect())
}

fn scrape_response_len(count: usize) -> usize {
    SCRAPE_RESPONSE_HEADER_LEN + SCRAPE_RECORD_LEN * count
}

fn read_u32(response: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        response[offset],
        response[offset + 1],
        response[offset + 2],
        response[offset + 3],
    ])
}

// Error packets are action 3 followed by the transaction ID and a message.
// One carrying another request's transaction ID is a mismatch, not an error.
fn check_error_packet(response: &[u8], transaction_id: u32) -> Result<(), TrackerError> {
    if response.len() >= SCRAPE_RESPONSE_HEADER_LEN && read_u32(response, 0) == ACTION_ERROR {
        let resp_tid = read_u32(response, 4);
        if resp_tid != transaction_id {
            return Err(TrackerError::ProtocolMismatch(Mismatch::Transaction {
                expected: transaction_id,
                actual: resp_tid,
            }));
        }
        let message = String::from_utf8_lossy(&response[8..]).to_string();
        return Err(TrackerError::Tracker(message));
    }
    Ok(())
}

fn check_header(response: &[u8], action: u32, transaction_id: u32) -> Result<(), TrackerError> {
    let resp_action = read_u32(response, 0);
    if resp_action != action {
        return Err(TrackerError::ProtocolMismatch(Mismatch::Action {
            expected: action,
            actual: resp_action,
        }));
    }

    let resp_tid = read_u32(response, 4);
    if resp_tid != transaction_id {
        return Err(TrackerError::ProtocolMismatch(Mismatch::Transaction {
            expected: transaction_id,
            actual: resp_tid,
        }));
    }

    Ok(())
}
