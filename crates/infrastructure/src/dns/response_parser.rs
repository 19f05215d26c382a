use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use querylog_shipper_domain::DomainError;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// First PTR target in the answer section, without the trailing dot.
    ///
    /// `Ok(None)` covers NXDOMAIN and answers without a PTR record.
    pub fn first_ptr(response_bytes: &[u8], expected_id: u16) -> Result<Option<String>, DomainError> {
        let response_id = wire_id(response_bytes)?;
        if response_id != expected_id {
            return Err(DomainError::InvalidResponse(format!(
                "DNS response ID {} does not match query ID {}",
                response_id, expected_id
            )));
        }

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        if rcode != ResponseCode::NoError {
            debug!(rcode = ?rcode, "PTR lookup returned no answer");
            return Ok(None);
        }

        let hostname = message.answers().iter().find_map(|record| match record.data() {
            RData::PTR(ptr) => Some(ptr.to_utf8().trim_end_matches('.').to_string()),
            _ => None,
        });

        Ok(hostname.filter(|name| !name.is_empty()))
    }
}

/// Message ID from the first two header octets.
pub(crate) fn wire_id(message_bytes: &[u8]) -> Result<u16, DomainError> {
    match message_bytes {
        [high, low, ..] => Ok(u16::from_be_bytes([*high, *low])),
        _ => Err(DomainError::InvalidResponse(format!(
            "DNS message too short: {} bytes",
            message_bytes.len()
        ))),
    }
}
