//! Integration tests against an in-process mock fixture.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

use cube_matrix_client::{ClientError, DeviceClient};
use serde_json::json;

/// Accepts one connection, reads one request line, writes the scripted
/// response bytes, and closes. Returns the address and a handle yielding
/// the received request line.
fn spawn_fixture(response: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        reader.read_line(&mut request).unwrap();
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        request
    });
    (addr, handle)
}

#[test]
fn send_returns_reply() {
    let (addr, fixture) = spawn_fixture("{\"id\":1,\"result\":[\"ok\"]}\r\n");

    let mut client = DeviceClient::new(addr);
    let reply = client.set_power_state(true).unwrap();
    assert_eq!(reply["result"], json!(["ok"]));

    let request = fixture.join().unwrap();
    assert_eq!(
        request.trim_end(),
        "{\"id\":1,\"method\":\"set_power\",\"params\":[\"on\",\"smooth\",500]}"
    );
}

#[test]
fn command_ids_are_per_instance_and_monotonic() {
    // Every send opens a fresh connection; serve two in sequence.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let fixture = thread::spawn(move || {
        let mut requests = Vec::new();
        for _ in 0..2 {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            reader.read_line(&mut request).unwrap();
            let mut stream = reader.into_inner();
            stream
                .write_all(b"{\"id\":0,\"result\":[\"ok\"]}\r\n")
                .unwrap();
            requests.push(request);
        }
        requests
    });

    let mut client = DeviceClient::with_start_id(addr, 42);
    client.set_brightness(80).unwrap();
    client.set_fx_mode("direct").unwrap();

    let requests = fixture.join().unwrap();
    assert_eq!(
        requests[0].trim_end(),
        "{\"id\":42,\"method\":\"set_bright\",\"params\":[80,\"smooth\",500]}"
    );
    assert_eq!(
        requests[1].trim_end(),
        "{\"id\":43,\"method\":\"activate_fx_mode\",\"params\":[{\"mode\":\"direct\"}]}"
    );
}

#[test]
fn props_pushes_are_absorbed() {
    let (addr, fixture) = spawn_fixture(
        "{\"method\":\"props\",\"params\":{\"power\":\"on\",\"bright\":50}}\r\n\
         {\"id\":1,\"result\":[\"ok\"]}\r\n",
    );

    let mut client = DeviceClient::new(addr);
    let reply = client.draw_matrices("AAAA").unwrap();
    fixture.join().unwrap();

    // The genuine reply comes back; the props frame lands in the cache.
    assert_eq!(reply["result"], json!(["ok"]));
    assert_eq!(client.last_properties().get("power"), Some(&json!("on")));
    assert_eq!(client.last_properties().get("bright"), Some(&json!(50)));
}

#[test]
fn malformed_lines_are_skipped() {
    let (addr, fixture) = spawn_fixture(
        "this is not json\r\n{\"id\":1,\"result\":[\"ok\"]}\r\n",
    );

    let mut client = DeviceClient::new(addr);
    let reply = client.set_power_state(false).unwrap();
    fixture.join().unwrap();
    assert_eq!(reply["result"], json!(["ok"]));
}

#[test]
fn close_without_reply_is_a_protocol_fault() {
    let (addr, fixture) = spawn_fixture("garbage only\r\n");

    let mut client = DeviceClient::new(addr);
    let err = client.set_power_state(true).unwrap_err();
    fixture.join().unwrap();
    assert!(matches!(err, ClientError::ClosedEarly { .. }));
}

#[test]
fn device_error_object_is_surfaced() {
    let (addr, fixture) = spawn_fixture(
        "{\"id\":1,\"error\":{\"code\":-1,\"message\":\"unsupported\"}}\r\n",
    );

    let mut client = DeviceClient::new(addr);
    let err = client.set_fx_mode("bogus").unwrap_err();
    fixture.join().unwrap();
    match err {
        ClientError::Device { method, error } => {
            assert_eq!(method, "activate_fx_mode");
            assert_eq!(error["message"], json!("unsupported"));
        }
        other => panic!("expected device error, got {other:?}"),
    }
}

#[test]
fn streaming_mode_skips_the_reply() {
    // The fixture never writes anything back.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let fixture = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        reader.read_line(&mut request).unwrap();
        request
    });

    let mut client = DeviceClient::new(addr);
    client.set_streaming(true);
    assert!(client.is_streaming());

    let reply = client.draw_matrices(&"/wAA".repeat(25)).unwrap();
    assert_eq!(reply["result"], json!(["ok"]));

    let request = fixture.join().unwrap();
    assert!(request.contains("\"method\":\"update_leds\""));
}

#[test]
fn connect_failure_is_a_connection_error() {
    // Bind then drop to obtain a port with no listener.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let mut client = DeviceClient::new(addr);
    let err = client.set_power_state(true).unwrap_err();
    assert!(matches!(err, ClientError::Connection { .. }));
}
