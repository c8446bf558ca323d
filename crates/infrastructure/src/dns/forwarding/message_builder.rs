//! DNS Message Builder
//!
//! Constructs TXT query messages in wire format using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;
use txtdirect_domain::DomainError;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive TXT query for `zone` and return its ID with the
    /// serialized bytes, ready to send over UDP or TCP.
    pub fn build_txt_query(zone: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(zone).map_err(|e| DomainError::DnsQuery {
            zone: zone.to_string(),
            reason: format!("Invalid zone name: {}", e),
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::TXT);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(zone, &message)?;
        Ok((id, bytes))
    }

    fn serialize_message(zone: &str, message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| DomainError::DnsQuery {
            zone: zone.to_string(),
            reason: format!("Failed to serialize DNS message: {}", e),
        })?;

        Ok(buf)
    }
}
