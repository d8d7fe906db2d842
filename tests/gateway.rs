use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::thread;

use geodesic_explorer::gateway::{
    GatewayError, HttpBackend, SimulationBackend, run_both, run_variant,
};
use geodesic_explorer::request::{
    MappedRequest, PotentialForm, PotentialRequest, PotentialResult, TrajectoryRequest,
    TrajectoryResult, map_parameters,
};
use geodesic_explorer::types::{OrbitParameters, Variant};

/// Scripted backend: records calls and fails on demand.
#[derive(Default)]
struct FakeBackend {
    fail_trajectory: Option<&'static str>,
    fail_potential: Option<&'static str>,
    calls: Mutex<Vec<(Variant, &'static str)>>,
}

impl SimulationBackend for FakeBackend {
    fn trajectory(
        &self,
        variant: Variant,
        request: &TrajectoryRequest,
    ) -> Result<TrajectoryResult, GatewayError> {
        self.calls.lock().expect("lock").push((variant, "trajectory"));
        if let Some(message) = self.fail_trajectory {
            return Err(GatewayError::from_status(500, message.to_string()));
        }
        let marker = if variant == Variant::Standard { 1.0 } else { 2.0 };
        Ok(TrajectoryResult::from_xy(
            vec![request.r0, marker],
            vec![0.0, marker],
        ))
    }

    fn potential(
        &self,
        variant: Variant,
        request: &PotentialRequest,
    ) -> Result<PotentialResult, GatewayError> {
        self.calls.lock().expect("lock").push((variant, "potential"));
        if let Some(message) = self.fail_potential {
            return Err(GatewayError::from_status(422, message.to_string()));
        }
        Ok(PotentialResult::new(
            vec![request.r_min, request.r_max],
            vec![0.0, 0.0],
            PotentialForm::Energy,
        ))
    }
}

fn request(variant: Variant) -> MappedRequest {
    map_parameters(variant, &OrbitParameters::default_for(variant)).expect("mapped")
}

#[test]
fn successful_run_returns_both_results() {
    let backend = FakeBackend::default();
    let outcome =
        run_variant(&backend, Variant::Standard, &request(Variant::Standard)).expect("outcome");
    assert_eq!(outcome.trajectory.x, vec![20.0, 1.0]);
    assert_eq!(outcome.potential.r[0], 2.05);

    let calls = backend.calls.lock().expect("lock");
    assert_eq!(calls.len(), 2);
    assert!(calls.contains(&(Variant::Standard, "trajectory")));
    assert!(calls.contains(&(Variant::Standard, "potential")));
}

#[test]
fn one_failing_call_fails_the_whole_run() {
    let backend = FakeBackend {
        fail_potential: Some("bad range"),
        ..FakeBackend::default()
    };
    let err = run_variant(&backend, Variant::Standard, &request(Variant::Standard))
        .expect_err("potential failure");
    assert_eq!(err.to_string(), "bad range");
    // Both calls were still issued.
    assert_eq!(backend.calls.lock().expect("lock").len(), 2);
}

#[test]
fn trajectory_error_wins_when_both_fail() {
    let backend = FakeBackend {
        fail_trajectory: Some("integrator diverged"),
        fail_potential: Some("bad range"),
        ..FakeBackend::default()
    };
    let err = run_variant(&backend, Variant::Noncommutative, &request(Variant::Noncommutative))
        .expect_err("failure");
    assert_eq!(err.to_string(), "integrator diverged");
}

#[test]
fn variants_are_independent() {
    /// Fails only the noncommutative pipeline.
    struct SplitBackend(FakeBackend);

    impl SimulationBackend for SplitBackend {
        fn trajectory(
            &self,
            variant: Variant,
            request: &TrajectoryRequest,
        ) -> Result<TrajectoryResult, GatewayError> {
            if variant == Variant::Noncommutative {
                return Err(GatewayError::from_status(503, String::new()));
            }
            self.0.trajectory(variant, request)
        }

        fn potential(
            &self,
            variant: Variant,
            request: &PotentialRequest,
        ) -> Result<PotentialResult, GatewayError> {
            self.0.potential(variant, request)
        }
    }

    let backend = SplitBackend(FakeBackend::default());
    let (standard, nc) = run_both(
        &backend,
        &request(Variant::Standard),
        &request(Variant::Noncommutative),
    );
    let standard = standard.expect("standard succeeds");
    assert_eq!(standard.trajectory.x[1], 1.0);
    assert_eq!(nc.expect_err("nc fails").to_string(), "HTTP 503");
}

#[test]
fn status_errors_use_body_or_status_code() {
    let err = GatewayError::from_status(500, "boom".to_string());
    assert_eq!(err.to_string(), "boom");
    let err = GatewayError::from_status(502, "  ".to_string());
    assert_eq!(err.to_string(), "HTTP 502");
}

#[test]
fn endpoint_joins_base_url_and_path() {
    let backend = HttpBackend::new("http://localhost:9000/").expect("client");
    assert_eq!(backend.base_url(), "http://localhost:9000/");
    assert_eq!(
        backend.endpoint(Variant::Noncommutative.trajectory_path()),
        "http://localhost:9000/simulate_nc"
    );
    assert_eq!(
        backend.endpoint(Variant::Standard.potential_path()),
        "http://localhost:9000/veff"
    );
}

/// Serve exactly one HTTP response on an ephemeral port; returns the base URL
/// and a handle yielding the raw request head.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read line");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().expect("content length");
            }
            head.push_str(&line);
        }
        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).expect("read body");
        head.push_str(&String::from_utf8_lossy(&payload));

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write");
        stream.flush().expect("flush");
        head
    });
    (format!("http://{addr}"), handle)
}

#[test]
fn http_backend_posts_json_and_decodes_response() {
    let (base_url, server) = serve_once("200 OK", r#"{"x": [1.0, 2.0], "y": [0.5, 0.25]}"#);
    let backend = HttpBackend::new(base_url).expect("client");
    let req = request(Variant::Standard);

    let result = backend
        .trajectory(Variant::Standard, &req.trajectory)
        .expect("trajectory");
    assert_eq!(result.y, vec![0.5, 0.25]);

    let raw = server.join().expect("server");
    assert!(raw.starts_with("POST /simulate "), "{raw}");
    assert!(raw.contains("\"metric\":\"schwarzschild\""), "{raw}");
    assert!(raw.contains("\"phi_max\""), "{raw}");
}

#[test]
fn http_backend_surfaces_error_body_verbatim() {
    let (base_url, server) = serve_once("500 Internal Server Error", "boom");
    let backend = HttpBackend::new(base_url).expect("client");
    let req = request(Variant::Noncommutative);

    let err = backend
        .potential(Variant::Noncommutative, &req.potential)
        .expect_err("status error");
    assert!(matches!(err, GatewayError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "boom");

    let raw = server.join().expect("server");
    assert!(raw.starts_with("POST /veff_nc "), "{raw}");
}

#[test]
fn malformed_response_is_a_decode_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"x": [1.0, 2.0], "y": [0.5]}"#);
    let backend = HttpBackend::new(base_url).expect("client");
    let req = request(Variant::Standard);

    let err = backend
        .trajectory(Variant::Standard, &req.trajectory)
        .expect_err("decode error");
    assert!(matches!(err, GatewayError::Decode { .. }), "{err:?}");
    server.join().expect("server");
}

#[test]
fn unreachable_service_is_a_network_error() {
    // Bind then drop to obtain a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .expect("bind")
        .local_addr()
        .expect("addr")
        .port();
    let backend = HttpBackend::new(format!("http://127.0.0.1:{port}")).expect("client");
    let req = request(Variant::Standard);
    let err = backend
        .potential(Variant::Standard, &req.potential)
        .expect_err("network error");
    assert!(matches!(err, GatewayError::Network(_)), "{err:?}");
}
