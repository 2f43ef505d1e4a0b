use std::net::SocketAddr;

use futures::channel::oneshot;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned HTTP response on a random port.
///
/// The receiver yields the raw request head.
pub async fn serve_once(
    status: &'static str,
    body: String,
) -> anyhow::Result<(SocketAddr, oneshot::Receiver<String>)> {
    let (tx, rx) = oneshot::channel::<String>();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await?;

        let mut head = vec![];
        let mut buf = [0; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await?;
        stream.shutdown().await?;

        tx.send(String::from_utf8_lossy(&head).to_string()).ok();
        anyhow::Result::<_>::Ok(())
    });

    Ok((addr, rx))
}

/// Serve one `200 OK` JSON response.
pub async fn serve_json(
    body: serde_json::Value,
) -> anyhow::Result<(SocketAddr, oneshot::Receiver<String>)> {
    serve_once("200 OK", body.to_string()).await
}

pub fn fc_info() -> serde_json::Value {
    serde_json::json!({
        "application-name": "feature-calculation",
        "application-version": "1.1",
        "features": {
            "Feature1": ["Foo.Bar.Baz", "What.Ever", "Age.Max", "duplicate"],
            "Feature2": ["node", "for", "newbies", "duplicate"]
        }
    })
}

pub fn vc_info(feature_names: &str) -> serde_json::Value {
    serde_json::json!({
        "application-name": "value-calculation",
        "application-version": "1.1",
        "models": [{
            "feature-names": feature_names,
            "created": "2018-08-16T11:00:00.000Z",
            "loaded-from-file": "/home/models/model.zip",
            "version": "1.0"
        }]
    })
}
