use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Excerpt in the layout of the IEEE `oui.txt` export: header, `(hex)` lines,
/// `(base 16)` lines, address lines and blank separators.
pub const SAMPLE_REGISTRY: &str = "OUI/MA-L                                                    Organization                                 \r
company_id                                                  Organization                                 \r
                                                            Address                                      \r
\r
84-38-35   (hex)\t\tApple, Inc.\r
843835     (base 16)\t\tApple, Inc.\r
\t\t\t\t1 Infinite Loop\r
\t\t\t\tCupertino  CA  95014\r
\t\t\t\tUS\r
\r
3C-D9-2B   (hex)\t\tHewlett Packard\r
3CD92B     (base 16)\t\tHewlett Packard\r
\t\t\t\t11445 Compaq Center Drive\r
\t\t\t\tHouston    77070\r
\t\t\t\tUS\r
\r
00-50-C2   (hex)\t\tIEEE Registration Authority\r
0050C2     (base 16)\t\tIEEE Registration Authority\r
\t\t\t\t445 Hoes Lane\r
\t\t\t\tPiscataway  NJ  08554\r
\t\t\t\tUS\r
\r
70B3D5F2F     (base 16)\t\tTiny Block Corp\r
\t\t\t\tSomewhere\r
";

/// Minimal HTTP server answering every request with a canned response and
/// counting how many requests it received.
pub struct RegistryServer {
    url: String,
    hits: Arc<AtomicUsize>,
}

impl RegistryServer {
    pub fn start(status: &'static str, body: &'static str) -> Self {
        Self::spawn(status, body, body.len())
    }

    /// Advertise more bytes than are sent, then close the connection
    pub fn start_truncated(body: &'static str) -> Self {
        Self::spawn("200 OK", body, body.len() + 1024)
    }

    fn spawn(status: &'static str, body: &'static str, content_length: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/oui/oui.txt", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                respond(stream, status, body, content_length);
            }
        });

        Self { url, hits }
    }

    /// A URL on a port nothing is listening on
    pub fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/oui/oui.txt", addr)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn respond(mut stream: TcpStream, status: &str, body: &str, content_length: usize) {
    // Drain the request head before answering
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_length,
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::parse_line;

    #[test]
    fn test_sample_registry_has_four_records() {
        let records = SAMPLE_REGISTRY.lines().filter_map(parse_line).count();
        assert_eq!(records, 4);
    }

    #[test]
    fn test_server_counts_hits() {
        let server = RegistryServer::start("200 OK", "hello");
        assert_eq!(server.hits(), 0);

        let addr = server.url().trim_start_matches("http://").split('/').next().unwrap();
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("hello"));
        assert_eq!(server.hits(), 1);
    }
}
