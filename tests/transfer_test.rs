use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use campdl::bandcamp::download::download_item;
use campdl::types::PurchaseItem;

fn item(id: u64) -> PurchaseItem {
    PurchaseItem {
        artist: "Some Band".to_string(),
        title: "Some Album".to_string(),
        id,
        download_url: String::new(),
        track_count: 1,
    }
}

/// Serves exactly one connection with a canned HTTP response, then closes
/// the socket.
async fn serve_once(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket.write_all(&response).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_download_writes_the_renamed_file() {
    let response = concat!(
        "HTTP/1.1 200 OK\r\n",
        "content-length: 4\r\n",
        "content-disposition: attachment; filename*=UTF-8''Album%20Name.zip\r\n",
        "connection: close\r\n",
        "\r\n",
        "data",
    );
    let url = serve_once(response.as_bytes().to_vec()).await;

    let dir = TempDir::new().unwrap();
    let filename = download_item(dir.path(), &item(12345), &url).await.unwrap();

    assert_eq!(filename, "Album Name (12345).zip");
    let written = std::fs::read(dir.path().join(&filename)).unwrap();
    assert_eq!(written, b"data");
}

#[tokio::test]
async fn test_failed_transfer_leaves_no_partial_file() {
    // the body is cut off long before the declared content length
    let response = concat!(
        "HTTP/1.1 200 OK\r\n",
        "content-length: 4096\r\n",
        "content-disposition: attachment; filename*=UTF-8''Album%20Name.zip\r\n",
        "connection: close\r\n",
        "\r\n",
        "data",
    );
    let url = serve_once(response.as_bytes().to_vec()).await;

    let dir = TempDir::new().unwrap();
    let result = download_item(dir.path(), &item(777), &url).await;

    assert!(result.is_err());
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_download_without_disposition_is_rejected() {
    let response = concat!(
        "HTTP/1.1 200 OK\r\n",
        "content-length: 4\r\n",
        "connection: close\r\n",
        "\r\n",
        "data",
    );
    let url = serve_once(response.as_bytes().to_vec()).await;

    let dir = TempDir::new().unwrap();
    let result = download_item(dir.path(), &item(1), &url).await;

    assert!(result.is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
