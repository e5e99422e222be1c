//! HTTP(S) source
//!
//! A blocking `Read` over an HTTP/1.1 response body. Each source owns a
//! current-thread tokio runtime that only runs inside `read`, so the pull
//! chain above stays synchronous.

use std::io::{self, Read};
use std::sync::Arc;

use bytes::{Buf, Bytes};
use http::header::{ACCEPT_ENCODING, CONTENT_LENGTH, HOST, LOCATION, USER_AGENT};
use http::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Empty};
use hyper::body::Incoming;
use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio_rustls::TlsConnector;
use url::Url;

use super::CloseHandle;
use crate::config::HttpConfig;
use crate::error::{self, TimedOut};

pub(crate) struct HttpSource {
    runtime: Runtime,
    body: Incoming,
    pending: Bytes,
    done: bool,
    location: String,
    close: CloseHandle,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("location", &self.location)
            .field("pending", &self.pending.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    /// Issue a GET for `location`, following redirects, and return the body reader
    ///
    /// Fails before any body byte is read if the final status is not 2xx.
    pub(crate) fn open(
        location: &str,
        config: &HttpConfig,
        close: CloseHandle,
    ) -> crate::Result<(Self, Option<u64>)> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
            .map_err(|e| error::transport(e).with_location(location))?;

        let mut url = Url::parse(location).map_err(|e| error::config(e).with_location(location))?;
        let mut redirects = 0;

        loop {
            let response = runtime.block_on(async {
                tokio::select! {
                    response = send_request(&url, config) => response,
                    () = close.closed() => Err(error::closed()),
                }
            })
            .map_err(|e| e.with_location(url.as_str()))?;

            let status = response.status();
            if is_followed_redirect(status) {
                if redirects >= config.max_redirects {
                    return Err(error::transport(format!(
                        "too many redirects (limit {})",
                        config.max_redirects
                    ))
                    .with_location(url.as_str()));
                }
                let target = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or_else(|| {
                        error::transport(format!("redirect {status} without a Location header"))
                            .with_location(url.as_str())
                    })?;
                let next = url
                    .join(target)
                    .map_err(|e| error::transport(e).with_location(url.as_str()))?;

                tracing::debug!(
                    target: "mrf_index::transport",
                    from = %url,
                    to = %next,
                    status = status.as_u16(),
                    "Following redirect"
                );
                url = next;
                redirects += 1;
                continue;
            }

            if !status.is_success() {
                return Err(error::status_code(url.as_str(), status));
            }

            let total_size = response
                .headers()
                .get(CONTENT_LENGTH)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok());

            tracing::debug!(
                target: "mrf_index::transport",
                location = %url,
                status = status.as_u16(),
                total_size,
                "Opened HTTP source"
            );

            return Ok((
                Self {
                    runtime,
                    body: response.into_body(),
                    pending: Bytes::new(),
                    done: false,
                    location: url.into(),
                    close,
                },
                total_size,
            ));
        }
    }
}

impl Read for HttpSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            self.close.check()?;

            if !self.pending.is_empty() {
                let count = buf.len().min(self.pending.len());
                buf[..count].copy_from_slice(&self.pending[..count]);
                self.pending.advance(count);
                return Ok(count);
            }
            if self.done {
                return Ok(0);
            }

            let Self {
                runtime,
                body,
                close,
                ..
            } = self;
            let frame = runtime.block_on(async {
                tokio::select! {
                    frame = body.frame() => Some(frame),
                    () = close.closed() => None,
                }
            });

            match frame {
                None => return Err(error::closed().into_io()),
                Some(None) => self.done = true,
                Some(Some(Ok(frame))) => {
                    if let Ok(data) = frame.into_data() {
                        self.pending = data;
                    }
                }
                Some(Some(Err(e))) => {
                    return Err(error::transport(e)
                        .with_location(self.location.as_str())
                        .into_io());
                }
            }
        }
    }
}

fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

async fn send_request(url: &Url, config: &HttpConfig) -> crate::Result<Response<Incoming>> {
    let host = url
        .host_str()
        .ok_or_else(|| error::config(format!("URL has no host: {url}")))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| error::config(format!("URL has no port: {url}")))?;
    let connect_host = host.trim_start_matches('[').trim_end_matches(']');

    let connect = TcpStream::connect((connect_host, port));
    let tcp = match config.connect_timeout {
        Some(timeout) => tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| error::transport(TimedOut))?,
        None => connect.await,
    }
    .map_err(error::transport)?;
    // Nagle only delays the single request we send
    let _ = tcp.set_nodelay(true);

    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    let request = Request::get(target)
        .header(HOST, authority)
        .header(USER_AGENT, config.user_agent.as_str())
        .header(ACCEPT_ENCODING, "identity")
        .body(Empty::<Bytes>::new())
        .map_err(error::config)?;

    match url.scheme() {
        "https" => {
            let server_name = ServerName::try_from(connect_host.to_string())
                .map_err(error::config)?;
            let tls = tls_connector()?.connect(server_name, tcp);
            let stream = match config.connect_timeout {
                Some(timeout) => tokio::time::timeout(timeout, tls)
                    .await
                    .map_err(|_| error::transport(TimedOut))?,
                None => tls.await,
            }
            .map_err(error::transport)?;
            send_on(TokioIo::new(stream), request).await
        }
        "http" => send_on(TokioIo::new(tcp), request).await,
        other => Err(error::config(format!("unsupported URL scheme: {other}"))),
    }
}

async fn send_on<T>(io: T, request: Request<Empty<Bytes>>) -> crate::Result<Response<Incoming>>
where
    T: hyper::rt::Read + hyper::rt::Write + Unpin + Send + 'static,
{
    let (mut sender, connection) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(error::transport)?;

    tokio::spawn(async move {
        if let Err(err) = connection.await {
            tracing::debug!(target: "mrf_index::transport", error = %err, "HTTP connection ended with error");
        }
    });

    sender.send_request(request).await.map_err(error::transport)
}

fn tls_connector() -> crate::Result<TlsConnector> {
    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let mut config = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(error::transport)?
    .with_root_certificates(roots)
    .with_no_client_auth();
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(TlsConnector::from(Arc::new(config)))
}
