//! One-shot HTTP server for exercising the blocking service adapters.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What the stub server saw.
pub struct RecordedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Serve exactly one request with `status` and `body`, returning the base URL
/// and a handle yielding the recorded request.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<RecordedRequest>) {
    serve_after(Duration::ZERO, status, body)
}

/// Like [`serve_once`], but holds the response back for `delay` after the
/// request has been read.
pub fn serve_after(
    delay: Duration,
    status: u16,
    body: &str,
) -> (String, JoinHandle<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        let lower = head.to_lowercase();
        let mut request_body = Vec::new();
        if let Some(len) = lower
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            request_body.resize(len, 0);
            reader.read_exact(&mut request_body).unwrap();
        } else if lower.contains("transfer-encoding: chunked") {
            loop {
                let mut size_line = String::new();
                reader.read_line(&mut size_line).unwrap();
                let size = usize::from_str_radix(size_line.trim(), 16).unwrap_or(0);
                let mut chunk = vec![0; size + 2];
                reader.read_exact(&mut chunk).unwrap();
                if size == 0 {
                    break;
                }
                request_body.extend_from_slice(&chunk[..size]);
            }
        }

        thread::sleep(delay);
        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        RecordedRequest {
            head,
            body: request_body,
        }
    });

    (format!("http://{addr}"), handle)
}

/// A base URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
