#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value;

/// Canned HTTP reply.
#[derive(Clone)]
pub struct Reply {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Reply {
    pub fn ok() -> Self {
        Self::text(200, "")
    }

    pub fn text(status: u16, body: &str) -> Self {
        Reply {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::text(status, &body.to_string()).header("Content-Type", "application/json")
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A request as the mock server saw it.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Loopback HTTP server answering `(method, path)` routes with canned
/// replies and recording every request. Unknown routes get a 404.
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    pub fn start(routes: Vec<(&str, &str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let routes: HashMap<(String, String), Reply> = routes
            .into_iter()
            .map(|(method, path, reply)| ((method.to_string(), path.to_string()), reply))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &routes, &seen);
            }
        });

        MockServer { addr, requests }
    }

    /// Value for `TenderClient::new`'s host argument.
    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path()))
            .collect()
    }

    pub fn find(&self, method: &str, path: &str) -> Option<Recorded> {
        self.requests()
            .into_iter()
            .find(|r| r.method == method && r.path() == path)
    }
}

fn serve(
    stream: TcpStream,
    routes: &HashMap<(String, String), Reply>,
    seen: &Arc<Mutex<Vec<Recorded>>>,
) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).expect("read request body");

    let recorded = Recorded {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let reply = routes
        .get(&(recorded.method.clone(), recorded.path().to_string()))
        .cloned()
        .unwrap_or_else(|| Reply::text(404, "no such route"));
    seen.lock().unwrap().push(recorded);

    let mut response = format!(
        "HTTP/1.1 {} Mock\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        reply.body.len()
    );
    for (name, value) in &reply.headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("\r\n");
    response.push_str(&reply.body);

    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Host of a loopback port that was bound and released, so nothing listens.
pub fn unreachable_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port address");
    drop(listener);
    format!("http://{}", addr)
}

/// Routes for a run where every stage succeeds.
pub fn happy_routes() -> Vec<(&'static str, &'static str, Reply)> {
    vec![
        ("GET", "/api/v1/test/ping", Reply::ok()),
        (
            "POST",
            "/api/v1/account/login",
            Reply::ok().header("Set-Cookie", "SESSION=abc; Path=/; HttpOnly"),
        ),
        (
            "GET",
            "/api/v1/tender/create",
            Reply::json(
                200,
                serde_json::json!({
                    "Corporates": [
                        { "Id": 101, "Name": "Acme Logistics", "ContactPersons": [{ "Id": 202, "Name": "Ivanov" }] }
                    ]
                }),
            ),
        ),
        ("POST", "/api/v1/tender/create", Reply::json(200, serde_json::json!("12345"))),
        (
            "GET",
            "/api/v1/tender/12345",
            Reply::json(
                200,
                serde_json::json!({
                    "Id": "12345",
                    "Number": "LGP-12345",
                    "Status": 1,
                    "StatusTitle": "Bidding",
                    "ActualDate": "2026-10-16 10:15",
                    "ActualDateTitle": "bidding started",
                    "RouteLenght": 712,
                    "ProposalsCount": 1,
                    "BestProposal": { "Bet": 42000 }
                }),
            ),
        ),
    ]
}

/// `happy_routes` with one route's reply replaced.
pub fn routes_with(method: &str, path: &str, reply: Reply) -> Vec<(&'static str, &'static str, Reply)> {
    happy_routes()
        .into_iter()
        .map(|(m, p, r)| {
            if m == method && p == path {
                (m, p, reply.clone())
            } else {
                (m, p, r)
            }
        })
        .collect()
}
