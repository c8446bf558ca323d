#![allow(dead_code)]
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub enum ZoneBehavior {
    Answers(Vec<String>),
    /// UDP answers carry the TC bit and no records; TCP gets the answers.
    Truncated(Vec<String>),
    ServFail,
    WrongId,
}

type Zones = Arc<Mutex<HashMap<String, ZoneBehavior>>>;

/// Authoritative-looking TXT server on ephemeral UDP and TCP ports sharing
/// one address. Unknown zones answer NXDOMAIN.
pub struct MockTxtServer {
    addr: SocketAddr,
    zones: Zones,
    tcp_queries: Arc<Mutex<usize>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTxtServer {
    pub async fn start() -> Self {
        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = udp.local_addr().unwrap();
        let tcp = TcpListener::bind(addr).await.unwrap();

        let zones: Zones = Arc::new(Mutex::new(HashMap::new()));
        let tcp_queries = Arc::new(Mutex::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_zones = Arc::clone(&zones);
        let tcp_zones = Arc::clone(&zones);
        let tcp_count = Arc::clone(&tcp_queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let response = build_response(&buf[..len], &udp_zones, false);
                            let _ = udp.send_to(&response, peer).await;
                        }
                    }
                    accepted = tcp.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            *tcp_count.lock().unwrap() += 1;
                            let zones = Arc::clone(&tcp_zones);
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                let response = build_response(&query, &zones, true);
                                let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                                framed.extend_from_slice(&response);
                                let _ = stream.write_all(&framed).await;
                            });
                        }
                    }
                }
            }
        });

        Self {
            addr,
            zones,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn set_zone(&self, zone: &str, behavior: ZoneBehavior) {
        self.zones
            .lock()
            .unwrap()
            .insert(zone.to_lowercase(), behavior);
    }

    pub fn with_txt(self, zone: &str, answers: &[&str]) -> Self {
        self.set_zone(
            zone,
            ZoneBehavior::Answers(answers.iter().map(|s| s.to_string()).collect()),
        );
        self
    }

    pub fn tcp_queries(&self) -> usize {
        *self.tcp_queries.lock().unwrap()
    }
}

impl Drop for MockTxtServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Returns the lowercased absolute qname and the offset past the question.
fn read_question(query: &[u8]) -> Option<(String, usize)> {
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_lowercase());
        pos += len;
    }
    Some((format!("{}.", labels.join(".")), pos + 4))
}

fn build_response(query: &[u8], zones: &Zones, over_tcp: bool) -> Vec<u8> {
    let Some((qname, question_end)) = read_question(query) else {
        return Vec::new();
    };
    let behavior = zones.lock().unwrap().get(&qname).cloned();

    let mut id = [query[0], query[1]];
    let mut flags = [0x81u8, 0x80u8];
    let mut answers: &[String] = &[];

    match &behavior {
        None => flags[1] |= 0x03,
        Some(ZoneBehavior::ServFail) => flags[1] |= 0x02,
        Some(ZoneBehavior::WrongId) => id = [id[0] ^ 0xff, id[1] ^ 0xff],
        Some(ZoneBehavior::Answers(a)) => answers = a.as_slice(),
        Some(ZoneBehavior::Truncated(a)) if over_tcp => answers = a.as_slice(),
        Some(ZoneBehavior::Truncated(_)) => flags[0] |= 0x02,
    }

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&id);
    response.extend_from_slice(&flags);
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[12..question_end]);

    for text in answers {
        let mut rdata = Vec::new();
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            rdata.push(0);
        }
        for chunk in bytes.chunks(255) {
            rdata.push(chunk.len() as u8);
            rdata.extend_from_slice(chunk);
        }
        response.extend_from_slice(&[
            0xc0, 0x0c, // name pointer to the question
            0x00, 0x10, // TXT
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c,
        ]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    response
}
