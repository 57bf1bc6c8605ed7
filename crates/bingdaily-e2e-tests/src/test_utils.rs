use bingdaily_lib::config::Config;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// In-process HTTP server serving a fixed page and a sequence of image
/// bodies, with request counters so tests can assert how often each
/// endpoint was hit. The raw head of every image request is recorded so
/// tests can assert on the headers the client sent.
pub struct FixtureServer {
    pub addr: SocketAddr,
    pub page_requests: Arc<AtomicUsize>,
    pub image_requests: Arc<AtomicUsize>,
    pub image_request_heads: Arc<Mutex<Vec<String>>>,
}

pub async fn spawn_fixture_server(
    page_html: String,
    image_bodies: Vec<Vec<u8>>,
) -> FixtureServer {
    spawn_server(page_html, image_bodies, false).await
}

/// Like [`spawn_fixture_server`], but image responses advertise a larger
/// `Content-Length` than the body actually sent and then close the
/// connection, simulating a download that fails mid-stream.
pub async fn spawn_truncating_fixture_server(
    page_html: String,
    image_body: Vec<u8>,
) -> FixtureServer {
    spawn_server(page_html, vec![image_body], true).await
}

async fn spawn_server(
    page_html: String,
    image_bodies: Vec<Vec<u8>>,
    truncate_images: bool,
) -> FixtureServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fixture server");
    let addr = listener
        .local_addr()
        .expect("Fixture server has no local address");

    let page_requests = Arc::new(AtomicUsize::new(0));
    let image_requests = Arc::new(AtomicUsize::new(0));
    let image_request_heads = Arc::new(Mutex::new(Vec::new()));

    {
        let page_requests = page_requests.clone();
        let image_requests = image_requests.clone();
        let image_request_heads = image_request_heads.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let Some(head) = read_request_head(&mut socket).await else {
                    continue;
                };
                let Some(path) = request_path(&head) else {
                    continue;
                };
                tracing::debug!(path = %path, "Fixture server request");

                let (status, body, truncate) = if path.contains("az/hprichbg") {
                    let index = image_requests.fetch_add(1, Ordering::SeqCst);
                    image_request_heads.lock().unwrap().push(head);
                    let body = image_bodies
                        .get(index)
                        .or_else(|| image_bodies.last())
                        .cloned()
                        .unwrap_or_default();
                    ("200 OK", body, truncate_images)
                } else if path == "/" {
                    page_requests.fetch_add(1, Ordering::SeqCst);
                    ("200 OK", page_html.clone().into_bytes(), false)
                } else {
                    ("404 Not Found", Vec::new(), false)
                };

                let advertised = if truncate {
                    body.len() + 1024
                } else {
                    body.len()
                };
                let header = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {advertised}\r\nConnection: close\r\n\r\n"
                );
                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            }
        });
    }

    FixtureServer {
        addr,
        page_requests,
        image_requests,
        image_request_heads,
    }
}

async fn read_request_head(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }

    Some(String::from_utf8_lossy(&buf).into_owned())
}

fn request_path(head: &str) -> Option<String> {
    let request_line = head.lines().next()?;
    request_line
        .split_whitespace()
        .nth(1)
        .map(|path| path.to_string())
}

/// Builds a configuration pointing at the fixture server with the given
/// content directory.
pub fn fixture_config(addr: SocketAddr, content_dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.protocol = "http".to_string();
    config.source.host = addr.to_string();
    config.storage.content_dir = content_dir.to_path_buf();
    config
}

/// Encodes a plain JPEG of the given dimensions for use as an image
/// response body.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Jpeg,
    )
    .expect("Failed to encode fixture JPEG");
    bytes
}

/// File name the store uses for an image downloaded today.
pub fn todays_file_name() -> String {
    format!("{}.jpg", chrono::Local::now().date_naive().format("%Y-%m-%d"))
}
