use satim::application::client::Credentials;
use satim::domain::operation::Operation;
use satim::domain::ports::HttpBackend;
use satim::infrastructure::http::ReqwestBackend;
use satim::{OrderStatus, SatimClient, SatimError};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

/// Serves one canned HTTP response on a loopback port and hands back the
/// request line it received.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (Url, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let request = String::from_utf8_lossy(&request);
        let request_line = request.lines().next().unwrap_or_default().to_string();
        tx.send(request_line).ok();
    });

    let endpoint = Url::parse(&format!("http://{addr}/payment/rest")).unwrap();
    (endpoint, rx)
}

/// Accepts connections on a loopback port and never answers them.
async fn serve_silence() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    Url::parse(&format!("http://{addr}/payment/rest")).unwrap()
}

fn backend() -> ReqwestBackend {
    let client = ReqwestBackend::client_builder(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();
    ReqwestBackend::with_client(client)
}

#[tokio::test]
async fn test_backend_returns_status_and_body() {
    let (endpoint, request_line) = serve_once("404 Not Found", r#"{"error":"nope"}"#).await;
    let url = Url::parse(&format!("{endpoint}/refund.do")).unwrap();

    let response = backend().get(&url).await.unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.body, br#"{"error":"nope"}"#.to_vec());

    let line = request_line.await.unwrap();
    assert!(line.starts_with("GET /payment/rest/refund.do"), "{line}");
}

#[tokio::test]
async fn test_client_over_real_http() {
    let (endpoint, request_line) = serve_once(
        "200 OK",
        r#"{"ErrorCode":"0","ErrorMessage":"Success","OrderStatus":2,"OrderNumber":"ORD-1001","Amount":10000}"#,
    )
    .await;

    let client = SatimClient::with_backend(
        Credentials::new("merchant", "s3cret", "E010900001"),
        endpoint.as_str(),
        Box::new(backend()),
    )
    .unwrap();

    let status = client.get_order_status("a1b2c3").await.unwrap();
    assert_eq!(status.status(), Some(OrderStatus::Paid));
    assert_eq!(status.order_number.as_deref(), Some("ORD-1001"));

    let line = request_line.await.unwrap();
    assert!(
        line.starts_with("GET /payment/rest/getOrderStatus.do?orderId=a1b2c3&password=s3cret&userName=merchant "),
        "{line}"
    );
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SatimClient::with_backend(
        Credentials::new("merchant", "s3cret", "E010900001"),
        &format!("http://{addr}/payment/rest"),
        Box::new(backend()),
    )
    .unwrap();

    let err = client.refund_order("a1b2c3", 5000).await.unwrap_err();
    assert!(matches!(err, SatimError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn test_transport_error_does_not_reveal_password() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SatimClient::with_backend(
        Credentials::new("merchant", "TopSecretPw", "E010900001"),
        &format!("http://{addr}/payment/rest"),
        Box::new(backend()),
    )
    .unwrap();

    let err = client.refund_order("a1b2c3", 5000).await.unwrap_err();
    assert!(!err.to_string().contains("TopSecretPw"), "{err}");
    assert!(!format!("{err:?}").contains("TopSecretPw"), "{err:?}");
}

#[tokio::test]
async fn test_silent_gateway_hits_client_deadline() {
    let endpoint = serve_silence().await;

    let client = SatimClient::with_backend(
        Credentials::new("merchant", "s3cret", "E010900001"),
        endpoint.as_str(),
        Box::new(backend()),
    )
    .unwrap()
    .with_timeout(Duration::from_millis(300));

    let err = client.get_order_status("a1b2c3").await.unwrap_err();
    assert!(
        matches!(
            err,
            SatimError::Timeout {
                operation: Operation::GetStatus,
                ..
            }
        ),
        "got {err:?}"
    );
}
