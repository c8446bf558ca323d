use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use tracing::debug;
use txtdirect_domain::DomainError;

#[derive(Debug, Clone)]
pub struct TxtResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// One entry per TXT resource record, character-strings concatenated.
    pub answers: Vec<String>,
}

impl TxtResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(zone: &str, response_bytes: &[u8]) -> Result<TxtResponse, DomainError> {
        if response_bytes.len() < 12 {
            return Err(DomainError::DnsQuery {
                zone: zone.to_string(),
                reason: format!("Response too short: {} bytes", response_bytes.len()),
            });
        }
        let id = u16::from_be_bytes([response_bytes[0], response_bytes[1]]);

        let message = Message::from_vec(response_bytes).map_err(|e| DomainError::DnsQuery {
            zone: zone.to_string(),
            reason: format!("Failed to parse DNS response: {}", e),
        })?;

        let mut answers = Vec::new();
        for record in message.answers() {
            if let RData::TXT(txt) = record.data() {
                let joined: String = txt
                    .txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk))
                    .collect();
                answers.push(joined);
            }
        }

        debug!(zone = %zone, answers = answers.len(), "TXT response parsed");

        Ok(TxtResponse {
            id,
            rcode: message.response_code(),
            truncated: message.truncated(),
            answers,
        })
    }
}
