//! # Node-Level Tests
//!
//! Boots `NodeRuntime` from a fixtures file on an ephemeral port and talks
//! raw HTTP/1.1 to it.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::SocketAddr;

    use authz_01_signature_verification::SignedRequest;
    use node_runtime::container::NodeConfig;
    use node_runtime::NodeRuntime;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use crate::integration::{embed_target, sign, XYZ_FIXTURES, XYZ_KEY, XYZ_SECRET};

    async fn http(addr: SocketAddr, method: &str, path: &str, headers: &[(String, String)]) -> String {
        let mut request = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n");
        for (name, value) in headers {
            request.push_str(&format!("{name}: {value}\r\n"));
        }
        request.push_str("Content-Length: 0\r\n\r\n");

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    fn status_line(response: &str) -> &str {
        response.lines().next().unwrap_or_default()
    }

    async fn start_node() -> (NodeRuntime, SocketAddr, tempfile::NamedTempFile) {
        let mut fixtures = tempfile::NamedTempFile::new().unwrap();
        fixtures.write_all(XYZ_FIXTURES.as_bytes()).unwrap();

        let mut config = NodeConfig::default();
        config.gateway.http.port = 0;
        config.directory.fixtures = Some(fixtures.path().to_path_buf());

        let mut runtime = NodeRuntime::new(config).unwrap();
        let addr = runtime.start().await.unwrap();
        (runtime, addr, fixtures)
    }

    #[tokio::test]
    async fn test_node_serves_seeded_directory() {
        let (mut runtime, addr, _fixtures) = start_node().await;

        let response = http(addr, "PUT", "/authorize/XYZ/pbs:api/station/utmedia/", &[]).await;
        assert!(status_line(&response).starts_with("HTTP/1.1 202"), "{response}");

        let response = http(addr, "POST", "/authorize/XYZ/pbs:api/topic/science-technology/", &[]).await;
        assert!(status_line(&response).starts_with("HTTP/1.1 403"), "{response}");

        let response = http(addr, "PATCH", "/authorize/XYZ/pbs:api/station/utmedia/", &[]).await;
        assert!(status_line(&response).starts_with("HTTP/1.1 405"), "{response}");

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_node_authenticates_over_socket() {
        let (mut runtime, addr, _fixtures) = start_node().await;

        let signed = sign(
            XYZ_KEY,
            XYZ_SECRET,
            SignedRequest::new("GET", "http://api.pbs.org/v1/shows?genre=drama"),
        );
        let path = format!("/authenticate/{}", embed_target(&signed.url));

        let response = http(addr, "GET", &path, &signed.headers).await;
        assert!(status_line(&response).starts_with("HTTP/1.1 202"), "{response}");
        assert!(response.contains(r#""name":"PBS""#));

        let response = http(addr, "GET", &path, &[]).await;
        assert!(status_line(&response).starts_with("HTTP/1.1 401"), "{response}");

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_admin_write_visible_to_running_node() {
        let (mut runtime, addr, _fixtures) = start_node().await;

        runtime.directory().delete_consumer(XYZ_KEY).unwrap();
        let response = http(addr, "GET", "/authorize/XYZ/pbs:api/station/utmedia/", &[]).await;
        assert!(status_line(&response).starts_with("HTTP/1.1 401"), "{response}");

        runtime.shutdown().await.unwrap();
    }
}
