//! Clipboard writes through the OSC 52 escape sequence, which terminals
//! (and most multiplexers) forward to the system clipboard.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STD;

/// Payloads above this are truncated; many terminals drop longer sequences.
pub const MAX_OSC52_BYTES: usize = 100 * 1024;

/// Build the OSC 52 sequence for `text`. Returns the sequence and whether
/// the payload had to be truncated.
pub fn osc52_sequence(text: &str) -> (String, bool) {
    let mut payload = text.as_bytes();
    let truncated = payload.len() > MAX_OSC52_BYTES;
    if truncated {
        payload = &payload[..MAX_OSC52_BYTES];
    }
    let b64 = BASE64_STD.encode(payload);
    (format!("\x1b]52;c;{b64}\x07"), truncated)
}
