#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use flate2::{Compression, write::GzEncoder};
use tempfile::NamedTempFile;

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

pub fn gzip_file(json: &str) -> NamedTempFile {
    raw_file(&gzip(json.as_bytes()))
}

pub fn raw_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().expect("utf8 path").to_string()
}

/// Canned HTTP response, optionally holding the connection open afterwards
pub struct Reply {
    pub bytes: Vec<u8>,
    pub hold: Option<Receiver<()>>,
}

impl Reply {
    pub fn new(head: &str, body: &[u8]) -> Self {
        let mut bytes = head.as_bytes().to_vec();
        bytes.extend_from_slice(body);
        Self { bytes, hold: None }
    }

    pub fn ok(body: &[u8]) -> Self {
        Self::new(
            &format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            ),
            body,
        )
    }
}

/// Serve one reply per accepted connection on a local port
pub fn serve(replies: Vec<Reply>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = thread::spawn(move || {
        let mut request_lines = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut first = true;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).expect("read request") == 0 || line == "\r\n" {
                    break;
                }
                if first {
                    request_lines.push(line.trim_end().to_string());
                    first = false;
                }
            }
            stream.write_all(&reply.bytes).expect("write reply");
            stream.flush().expect("flush reply");
            if let Some(hold) = reply.hold {
                let _ = hold.recv();
            }
        }
        request_lines
    });

    (base, handle)
}
