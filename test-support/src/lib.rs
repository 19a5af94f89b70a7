//! Canned HTTP backend for tests
//!
//! [`CannedServer`] listens on an ephemeral localhost port and answers one
//! request per canned response, in order, recording what it was sent. It
//! runs on a plain thread, so it serves blocking and async clients alike.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// One request as the server received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Value of the first header named `name`, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Request body as text, empty when there was none
    pub fn body(&self) -> &str {
        &self.body
    }
}

pub struct CannedServer {
    base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl CannedServer {
    /// Start serving `responses`, given as `(status, json body)` pairs
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            responses
                .into_iter()
                .map(|(status, body)| {
                    let (mut stream, _) = listener.accept().unwrap();
                    let request = read_request(&stream);
                    write!(
                        stream,
                        "HTTP/1.1 {} Canned\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    )
                    .unwrap();
                    request
                })
                .collect()
        });

        Self { base_url, handle }
    }

    /// Shorthand for a server answering a single request
    pub fn once(status: u16, body: &'static str) -> Self {
        Self::start(vec![(status, body)])
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wait until every canned response was sent and return the requests
    ///
    /// Blocks forever if the client makes fewer requests than there are
    /// responses.
    pub fn requests(self) -> Vec<RecordedRequest> {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &TcpStream) -> RecordedRequest {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap().to_string();
    let path = parts.next().unwrap().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .map(|(_, v)| v.parse::<usize>().unwrap())
        .unwrap_or(0);

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();

    RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}
