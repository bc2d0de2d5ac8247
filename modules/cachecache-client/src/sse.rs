//! Incremental decoder for `text/event-stream` bodies.
//!
//! Feeds on raw byte chunks as the transport delivers them — chunks may split
//! an event, a line, even a UTF-8 sequence — and yields the `data` payload of
//! each completed event. Field handling follows the SSE wire format: `data:`
//! lines accumulate (joined with newlines), a blank line dispatches, `:`
//! comment lines and non-data fields (`event:`, `id:`, `retry:`) are ignored.

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one transport chunk, returning the payloads of every event the
    /// chunk completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline).collect();
            let mut line = String::from_utf8_lossy(&raw[..raw.len() - 1]).into_owned();
            if line.ends_with('\r') {
                line.pop();
            }
            if let Some(event) = self.take_line(&line) {
                events.push(event);
            }
        }
        events
    }

    fn take_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            // Dispatch. An event with no data lines dispatches nothing.
            if self.data.is_empty() {
                return None;
            }
            return Some(self.data.drain(..).collect::<Vec<_>>().join("\n"));
        }
        if line.starts_with(':') {
            return None; // comment / keep-alive
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_single_event() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"kind\":\"PING\"}\n\n");
        assert_eq!(events, vec![r#"{"kind":"PING"}"#]);
    }

    #[test]
    fn handles_chunks_split_mid_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"kind\":").is_empty());
        assert!(decoder.feed(b"\"NEW_GAME\"}").is_empty());
        let events = decoder.feed(b"\n\n");
        assert_eq!(events, vec![r#"{"kind":"NEW_GAME"}"#]);
    }

    #[test]
    fn handles_multiple_events_in_one_chunk() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: one\n\ndata: two\n\n");
        assert_eq!(events, vec!["one", "two"]);
    }

    #[test]
    fn joins_multi_line_data() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: first\ndata: second\n\n");
        assert_eq!(events, vec!["first\nsecond"]);
    }

    #[test]
    fn ignores_comments_and_other_fields() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b": keep-alive\nevent: message\nid: 7\nretry: 100\ndata: payload\n\n");
        assert_eq!(events, vec!["payload"]);
    }

    #[test]
    fn blank_line_without_data_dispatches_nothing() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"\n\n: ping\n\n").is_empty());
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: payload\r\n\r\n");
        assert_eq!(events, vec!["payload"]);
    }

    #[test]
    fn survives_utf8_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let bytes = "data: Panthéon\n\n".as_bytes();
        // Split inside the two-byte 'é'.
        let split = bytes.iter().position(|&b| b >= 0x80).unwrap() + 1;
        assert!(decoder.feed(&bytes[..split]).is_empty());
        let events = decoder.feed(&bytes[split..]);
        assert_eq!(events, vec!["Panthéon"]);
    }
}
