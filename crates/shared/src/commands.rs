//! Reserved command names and request metadata shared by client and server.

/// Request header carrying the client's session token.
pub const SESSION_HEADER: &str = "X-Session";

/// Client-local command that switches the active server port. Never sent to the server.
pub const CONNECT_COMMAND: &str = "/connect";

/// Handshake command whose first span becomes the display title.
pub const TITLE_COMMAND: &str = "/title";

/// Handshake command whose response is rendered after connecting.
pub const HELLO_COMMAND: &str = "/hello";

pub fn endpoint_for_port(port: &str) -> String {
    format!("http://localhost:{port}")
}

/// Port argument of a `/connect` line, if the line is one.
///
/// Any line starting with `/connect` is intercepted; the port is the token after the first
/// space and may be missing.
pub fn parse_connect(line: &str) -> Option<Option<&str>> {
    if !line.starts_with(CONNECT_COMMAND) {
        return None;
    }
    Some(line.split(' ').nth(1).filter(|port| !port.is_empty()))
}
