#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock server answers PTR queries.
#[derive(Clone)]
pub enum PtrBehavior {
    /// One PTR record pointing at this name (written with a trailing dot).
    Answer(String),
    NxDomain,
    /// Never reply, so the client times out.
    Silent,
    /// Reply with a different transaction ID.
    WrongId,
    /// Correct answer, but sent from a different local port.
    AnswerFromOtherPort(String),
}

/// Minimal DNS server on localhost answering every query the same way.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: PtrBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::Relaxed);
                            if let Some(response) = Self::build_response(&buf[..len], &behavior) {
                                if matches!(behavior, PtrBehavior::AnswerFromOtherPort(_)) {
                                    if let Ok(other) =
                                        UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await
                                    {
                                        let _ = other.send_to(&response, peer).await;
                                    }
                                } else {
                                    let _ = socket.send_to(&response, peer).await;
                                }
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn build_response(query: &[u8], behavior: &PtrBehavior) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let mut response = Vec::with_capacity(512);

        match behavior {
            PtrBehavior::Silent => return None,
            PtrBehavior::WrongId => {
                response.push(query[0].wrapping_add(1));
                response.push(query[1]);
            }
            _ => response.extend_from_slice(&query[0..2]),
        }

        // QR=1, RD=1
        response.push(0x81);
        // RA=1, RCODE
        response.push(match behavior {
            PtrBehavior::NxDomain => 0x83,
            _ => 0x80,
        });

        // Question count from the query
        response.extend_from_slice(&query[4..6]);

        let answers: u16 = match behavior {
            PtrBehavior::Answer(_)
            | PtrBehavior::AnswerFromOtherPort(_)
            | PtrBehavior::WrongId => 1,
            _ => 0,
        };
        response.extend_from_slice(&answers.to_be_bytes());
        // No authority or additional records
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        response.extend_from_slice(&query[12..]);

        let target = match behavior {
            PtrBehavior::Answer(name) | PtrBehavior::AnswerFromOtherPort(name) => {
                name.as_str()
            }
            PtrBehavior::WrongId => "other.lan.",
            _ => return Some(response),
        };
        let rdata = encode_name(target);
        response.extend_from_slice(&[
            0xc0, 0x0c, // Name pointer to question
            0x00, 0x0c, // Type PTR
            0x00, 0x01, // Class IN
            0x00, 0x00, 0x00, 0x3c, // TTL: 60 seconds
        ]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);

        Some(response)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}
