use httptiny::network::application::http::{
    Client, Error, MAX_LINE_LEN, Method, Proxy, Request, ShortRead, StatusCode,
};

use crate::mock::{Fault, MockNetwork};

const HELLO: &[u8] = b"HTTP/1.0 200 OK\r\nContent-Length: 5\r\n\r\nhello";

fn request(url: &str) -> Request {
    Request::from_url(url).unwrap().with_user_agent("test-agent/1.0")
}

fn assert_released(network: &MockNetwork) {
    let ledger = network.ledger.borrow();
    assert_eq!(ledger.opened, ledger.closed, "every opened connection is closed");
    assert!(ledger.opened <= 1);
}

#[test]
fn test_get_reads_body() {
    let network = MockNetwork::new(HELLO);
    let ledger = network.ledger();
    let mut client = Client::new(network);
    let mut body = [0u8; 64];

    let resource = client.get_into(&request("http://example.com/greeting"), &mut body).unwrap();

    assert_eq!(resource.status, StatusCode::OK);
    assert_eq!(resource.body, b"hello");
    assert_eq!(resource.content_type, None);
    assert_eq!(
        ledger.borrow().sent_text(),
        "GET /greeting HTTP/1.0\r\nUser-Agent: test-agent/1.0\r\n\r\n"
    );
    assert_eq!(ledger.borrow().resolved, vec![("example.com".to_string(), 80)]);
    assert_released(&client.into_inner());
}

#[test]
fn test_get_inline_body() {
    let mut client = Client::new(MockNetwork::new(HELLO));

    let response = client.get::<16>(&request("http://example.com/greeting")).unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"hello");
    assert_released(&client.into_inner());
}

#[test]
fn test_get_with_chunked_delivery() {
    let response = b"HTTP/1.1 200 OK\r\n\
        Server: test\r\n\
        content-TYPE: text/plain; charset=utf-8\r\n\
        CONTENT-LENGTH: 11\r\n\
        X-Trailing: ignored\r\n\
        \r\n\
        hello world";
    let mut client = Client::new(MockNetwork::new(response).chunked(3));
    let mut body = [0u8; 64];

    let resource = client.get_into(&request("http://example.com/a"), &mut body).unwrap();

    assert_eq!(resource.body, b"hello world");
    assert_eq!(resource.content_type.as_deref(), Some("text/plain;"));
    assert_released(&client.into_inner());
}

#[test]
fn test_get_reads_only_content_length_bytes() {
    let response = b"HTTP/1.0 200 OK\r\nContent-Length: 3\r\n\r\nabcdef";
    let mut client = Client::new(MockNetwork::new(response));
    let mut body = [0u8; 64];

    let resource = client.get_into(&request("http://h/x"), &mut body).unwrap();

    assert_eq!(resource.body, b"abc");
}

#[test]
fn test_get_not_found_skips_body() {
    let response = b"HTTP/1.0 404 Not Found\r\n\r\n";
    let mut client = Client::new(MockNetwork::new(response));
    let mut body = [0xAAu8; 8];

    let resource = client.get_into(&request("http://h/missing"), &mut body).unwrap();

    assert_eq!(resource.status, StatusCode::NOT_FOUND);
    assert!(resource.body.is_empty());
    assert_eq!(body, [0xAA; 8]);
    assert_released(&client.into_inner());
}

#[test]
fn test_get_empty_buffer_is_null_argument() {
    let network = MockNetwork::new(HELLO);
    let ledger = network.ledger();
    let mut client = Client::new(network);

    assert_eq!(client.get_into(&request("http://h/x"), &mut []), Err(Error::NullArgument));
    assert_eq!(client.get::<0>(&request("http://h/x")), Err(Error::NullArgument));
    assert_eq!(ledger.borrow().opened, 0);
    assert!(ledger.borrow().resolved.is_empty());
}

#[test]
fn test_get_missing_length() {
    let response = b"HTTP/1.0 200 OK\r\nContent-Type: text/html\r\n\r\n<html>";
    let mut client = Client::new(MockNetwork::new(response));
    let mut body = [0u8; 64];

    assert_eq!(
        client.get_into(&request("http://h/x"), &mut body),
        Err(Error::MissingLength)
    );
    assert_released(&client.into_inner());
}

#[test]
fn test_get_zero_or_negative_length() {
    for header in ["Content-Length: 0", "Content-Length: -5", "Content-Length: lots"] {
        let response = format!("HTTP/1.0 200 OK\r\n{header}\r\n\r\n");
        let mut client = Client::new(MockNetwork::new(response.as_bytes()));
        let mut body = [0u8; 64];

        assert_eq!(
            client.get_into(&request("http://h/x"), &mut body),
            Err(Error::MissingLength),
            "{header}"
        );
        assert_released(&client.into_inner());
    }
}

#[test]
fn test_get_body_larger_than_buffer() {
    let mut client = Client::new(MockNetwork::new(HELLO));
    let mut body = [0u8; 4];

    assert_eq!(
        client.get_into(&request("http://h/x"), &mut body),
        Err(Error::OutOfMemory)
    );
    assert_released(&client.into_inner());
}

#[test]
fn test_get_truncated_body() {
    let response = b"HTTP/1.0 200 OK\r\nContent-Length: 10\r\n\r\nabcd";
    let mut client = Client::new(MockNetwork::new(response));
    let mut body = [0u8; 64];

    assert_eq!(client.get_into(&request("http://h/x"), &mut body), Err(Error::BodyRead));
    assert_released(&client.into_inner());
}

fn padded_response(pad_len: usize) -> Vec<u8> {
    let mut response = b"HTTP/1.0 200 OK\r\nX-Pad: ".to_vec();
    response.resize(pad_len + b"HTTP/1.0 200 OK\r\n".len(), b'a');
    response.extend_from_slice(b"\r\nContent-Length: 5\r\n\r\nhello");
    response
}

#[test]
fn test_get_skips_overlong_header_lines() {
    for pad_len in [MAX_LINE_LEN - 1, MAX_LINE_LEN, MAX_LINE_LEN + 1, 2 * MAX_LINE_LEN] {
        let response = padded_response(pad_len);
        let mut client = Client::new(MockNetwork::new(&response).chunked(7));
        let mut body = [0u8; 16];

        let resource = client.get_into(&request("http://h/x"), &mut body);

        let resource = resource.unwrap_or_else(|e| panic!("pad {pad_len}: {e:?}"));
        assert_eq!(resource.status, StatusCode::OK);
        assert_eq!(resource.body, b"hello");
        assert_released(&client.into_inner());
    }
}

#[test]
fn test_head_skips_overlong_header_lines() {
    let mut client = Client::new(MockNetwork::new(&padded_response(2 * MAX_LINE_LEN)));

    let metadata = client.head(&request("http://h/x")).unwrap();

    assert_eq!(metadata.content_length, Some(5));
}

#[test]
fn test_long_status_reason_is_skipped() {
    let mut response = b"HTTP/1.0 200 ".to_vec();
    response.resize(MAX_LINE_LEN + 50, b'r');
    response.extend_from_slice(b"\r\nContent-Length: 2\r\n\r\nok");
    let mut client = Client::new(MockNetwork::new(&response));

    let response = client.get::<8>(&request("http://h/x")).unwrap();

    assert_eq!(&response.body[..], b"ok");
}

#[test]
fn test_get_headers_cut_short() {
    let response = b"HTTP/1.0 200 OK\r\nContent-Length: 5\r\n";
    let mut client = Client::new(MockNetwork::new(response));
    let mut body = [0u8; 64];

    assert_eq!(client.get_into(&request("http://h/x"), &mut body), Err(Error::HeaderRead));
    assert_released(&client.into_inner());
}

#[test]
fn test_head_reports_metadata() {
    let response = b"HTTP/1.0 200 OK\r\nContent-Type: image/png\r\nContent-Length: 2048\r\n\r\n";
    let network = MockNetwork::new(response);
    let ledger = network.ledger();
    let mut client = Client::new(network);

    let metadata = client.head(&request("http://h/logo.png")).unwrap();

    assert_eq!(metadata.status, StatusCode::OK);
    assert_eq!(metadata.content_length, Some(2048));
    assert_eq!(metadata.content_type.as_deref(), Some("image/png"));
    assert!(ledger.borrow().sent_text().starts_with("HEAD /logo.png HTTP/1.0\r\n"));
    assert_released(&client.into_inner());
}

#[test]
fn test_head_without_length() {
    let response = b"HTTP/1.0 200 OK\r\n\r\n";
    let mut client = Client::new(MockNetwork::new(response));

    let metadata = client.head(&request("http://h/x")).unwrap();

    assert_eq!(metadata.content_length, None);
    assert_eq!(metadata.content_type, None);
    assert_released(&client.into_inner());
}

#[test]
fn test_head_server_error() {
    let response = b"HTTP/1.0 503 Service Unavailable\r\n\r\n";
    let mut client = Client::new(MockNetwork::new(response));

    let metadata = client.head(&request("http://h/x")).unwrap();

    assert_eq!(metadata.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(metadata.status.is_server_error());
    assert_released(&client.into_inner());
}

#[test]
fn test_put_headers_and_body() {
    let network = MockNetwork::new(b"HTTP/1.0 201 Created\r\n\r\n");
    let ledger = network.ledger();
    let mut client = Client::new(network);

    let status = client
        .put(&request("http://h/notes.txt"), b"some notes", true, Some("text/plain"))
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    let ledger = ledger.borrow();
    assert_eq!(ledger.writes.len(), 2);
    assert_eq!(
        ledger.writes[0],
        b"PUT /notes.txt HTTP/1.0\r\n\
          User-Agent: test-agent/1.0\r\n\
          Content-Length: 10\r\n\
          Content-Type: text/plain\r\n\
          Control: overwrite=1\r\n\
          \r\n"
    );
    assert_eq!(ledger.writes[1], b"some notes");
    assert_eq!(ledger.opened, 1);
    assert_eq!(ledger.closed, 1);
}

#[test]
fn test_put_without_type_or_overwrite() {
    let network = MockNetwork::new(b"HTTP/1.0 200 OK\r\n\r\n");
    let ledger = network.ledger();
    let mut client = Client::new(network);

    client.put(&request("http://h/x"), b"abc", false, None).unwrap();

    let sent = ledger.borrow().sent_text();
    assert!(sent.contains("Content-Length: 3\r\n"));
    assert!(!sent.contains("Content-Type"));
    assert!(!sent.contains("Control"));
    assert!(sent.ends_with("\r\n\r\nabc"));
}

#[test]
fn test_put_empty_body_sends_only_head() {
    let network = MockNetwork::new(b"HTTP/1.0 200 OK\r\n\r\n");
    let ledger = network.ledger();
    let mut client = Client::new(network);

    client.put(&request("http://h/x"), b"", false, None).unwrap();

    assert_eq!(ledger.borrow().writes.len(), 1);
    assert!(ledger.borrow().sent_text().contains("Content-Length: 0\r\n"));
}

#[test]
fn test_put_truncates_content_type() {
    let network = MockNetwork::new(b"HTTP/1.0 200 OK\r\n\r\n");
    let ledger = network.ledger();
    let mut client = Client::new(network);
    let long_type = format!("application/{}", "x".repeat(100));

    client.put(&request("http://h/x"), b"a", false, Some(&long_type)).unwrap();

    let expected = format!("Content-Type: {}\r\n", &long_type[..64]);
    assert!(ledger.borrow().sent_text().contains(&expected));
}

#[test]
fn test_put_returns_server_status_verbatim() {
    let mut client = Client::new(MockNetwork::new(b"HTTP/1.0 403 Forbidden\r\n\r\n"));

    let status = client.put(&request("http://h/x"), b"a", true, None).unwrap();

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(status.as_u16(), 403);
    assert_released(&client.into_inner());
}

#[test]
fn test_delete() {
    let network = MockNetwork::new(b"HTTP/1.0 200 OK\r\n\r\n");
    let ledger = network.ledger();
    let mut client = Client::new(network);

    let status = client.delete(&request("http://h/old.txt")).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ledger.borrow().sent_text(),
        "DELETE /old.txt HTTP/1.0\r\nUser-Agent: test-agent/1.0\r\n\r\n"
    );
    assert_released(&client.into_inner());
}

#[test]
fn test_proxied_request_uses_absolute_target() {
    let network = MockNetwork::new(HELLO);
    let ledger = network.ledger();
    let mut client = Client::new(network);
    let request = request("http://origin.example:8080/data")
        .with_proxy(Proxy::new("proxy.local", 3128).unwrap());
    let mut body = [0u8; 16];

    client.get_into(&request, &mut body).unwrap();

    let ledger = ledger.borrow();
    assert_eq!(ledger.resolved, vec![("proxy.local".to_string(), 3128)]);
    assert!(
        ledger
            .sent_text()
            .starts_with("GET http://origin.example:8080/data HTTP/1.0\r\n")
    );
}

#[test]
fn test_descriptor_reused_across_operations() {
    let network = MockNetwork::new(b"HTTP/1.0 200 OK\r\nContent-Length: 2\r\n\r\nok");
    let ledger = network.ledger();
    let mut client = Client::new(network);
    let mut request = request("http://h/first");
    let mut body = [0u8; 8];

    client.get_into(&request, &mut body).unwrap();
    request.set_path("second");
    client.put(&request, b"data", false, None).unwrap();

    let ledger = ledger.borrow();
    assert_eq!(ledger.opened, 2);
    assert_eq!(ledger.closed, 2);
    let sent = ledger.sent_text();
    assert!(sent.contains("GET /first HTTP/1.0"));
    assert!(sent.contains("PUT /second HTTP/1.0"));
}

#[test]
fn test_status_line_variants() {
    let cases: [(&[u8], Result<u16, Error>); 7] = [
        (b"HTTP/1.1 200 OK\r\n\r\n", Ok(200)),
        (b"HTTP/1.0 201\r\n\r\n", Ok(201)),
        (b"HTTP/1.9  500 Boom\r\n\r\n", Ok(500)),
        (b"HTTP/2 200 OK\r\n\r\n", Err(Error::MalformedStatus)),
        (b"ICY 200 OK\r\n\r\n", Err(Error::MalformedStatus)),
        (b"HTTP/1.0 2000 OK\r\n\r\n", Err(Error::MalformedStatus)),
        (b"\r\n", Err(Error::MalformedStatus)),
    ];

    for (response, expected) in cases {
        let mut client = Client::new(MockNetwork::new(response));
        let result = client.delete(&request("http://h/x")).map(StatusCode::as_u16);
        assert_eq!(result, expected, "{}", String::from_utf8_lossy(response));
        assert_released(&client.into_inner());
    }
}

#[test]
fn test_no_answer_is_header_read_error() {
    let mut client = Client::new(MockNetwork::new(b""));
    assert_eq!(client.delete(&request("http://h/x")), Err(Error::HeaderRead));
    assert_released(&client.into_inner());

    let mut client = Client::new(MockNetwork::new(b"HTTP/1.0 200 OK"));
    assert_eq!(client.delete(&request("http://h/x")), Err(Error::HeaderRead));
    assert_released(&client.into_inner());
}

#[test]
fn test_transport_faults_map_to_error_kinds() {
    let cases = [
        (Fault::Resolve, Error::HostNotFound),
        (Fault::Open, Error::Socket),
        (Fault::Connect, Error::Connect),
        (Fault::HeaderWriteError, Error::HeaderWrite),
        (Fault::HeaderShortWrite, Error::HeaderWrite),
        (Fault::BodyWriteError, Error::BodyWrite),
        (Fault::BodyShortWrite, Error::BodyWrite),
        (Fault::ReadError, Error::HeaderRead),
    ];

    for (fault, expected) in cases {
        let network = MockNetwork::new(HELLO).failing(fault);
        let ledger = network.ledger();
        let mut client = Client::new(network);

        let result = client.put(&request("http://h/x"), b"body", true, None);

        assert_eq!(result, Err(expected), "{fault:?}");
        let ledger = ledger.borrow();
        assert_eq!(ledger.opened, ledger.closed, "{fault:?}");
        let expected_opened = usize::from(!matches!(fault, Fault::Resolve | Fault::Open));
        assert_eq!(ledger.opened, expected_opened, "{fault:?}");
    }
}

#[test]
fn test_every_get_path_releases_connection() {
    let responses: [&[u8]; 7] = [
        HELLO,
        b"HTTP/1.0 404 Not Found\r\n\r\n",
        b"HTTP/1.0 200 OK\r\n\r\n",
        b"HTTP/1.0 200 OK\r\nContent-Length: 9\r\n\r\nabc",
        b"HTTP/1.0 200 OK\r\nContent-Length: 500\r\n\r\n",
        b"HTTP/1.0 200 OK\r\nContent-Len",
        b"garbage\r\n",
    ];

    for response in responses {
        let network = MockNetwork::new(response);
        let ledger = network.ledger();
        let mut client = Client::new(network);
        let mut body = [0u8; 32];

        let _ = client.get_into(&request("http://h/x"), &mut body);
        let _ = client.head(&request("http://h/x"));

        let ledger = ledger.borrow();
        assert_eq!(ledger.opened, 2);
        assert_eq!(ledger.closed, 2, "{}", String::from_utf8_lossy(response));
    }
}

#[test]
fn test_open_hands_over_stream() {
    let network = MockNetwork::new(HELLO);
    let ledger = network.ledger();
    let mut client = Client::new(network);

    let mut stream = client
        .open(&request("http://h/x"), Method::Get, "Accept: */*\r\n", &[])
        .unwrap();
    assert_eq!(stream.status(), StatusCode::OK);
    assert_eq!(ledger.borrow().closed, 0);

    let headers = stream.read_headers().unwrap();
    assert_eq!(headers.content_length, Some(5));
    let mut body = [0u8; 5];
    assert_eq!(stream.read_exact(&mut body), Ok(5));
    assert_eq!(&body, b"hello");
    let mut more = [0u8; 1];
    assert_eq!(stream.read_exact(&mut more), Err(ShortRead { read: 0 }));

    stream.close().unwrap();
    assert_eq!(ledger.borrow().closed, 1);
    assert!(ledger.borrow().sent_text().contains("\r\nAccept: */*\r\n\r\n"));
}

#[test]
fn test_error_codes_are_negative_and_distinct() {
    let errors = [
        Error::HostNotFound,
        Error::Socket,
        Error::Connect,
        Error::HeaderWrite,
        Error::BodyWrite,
        Error::HeaderRead,
        Error::MalformedStatus,
        Error::NullArgument,
        Error::MissingLength,
        Error::OutOfMemory,
        Error::BodyRead,
        Error::InvalidUrlScheme,
        Error::InvalidUrlPort,
        Error::InvalidUrlHost,
        Error::InvalidUrlPath,
    ];
    let mut codes: Vec<i32> = errors.iter().map(|e| e.code()).collect();
    assert!(codes.iter().all(|&c| c < 0));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
    assert_eq!(Error::HostNotFound.code(), -1);
    assert_eq!(Error::InvalidUrlPort.code(), -13);
    assert_eq!(Error::InvalidUrlPath.code(), -15);
}
