//! The linear call cycle shared by every guest module.
//!
//! decode → validate → build request → lend → invoke → extract → emit.
//! A module supplies the two business steps ([`GuestModule::plan`] and
//! [`GuestModule::complete`]); everything else lives here.

use crate::config::GuestConfig;
use crate::cycle::{Cycle, CycleState};
use crate::error::GuestError;
use crate::host::{platform_host, HostCallInvoker, HostImports};
use crate::logging::init_logging;
use crate::output::{Emission, ExitSignal, Output, OutputEncoder};
use crate::request::{PreparedRequest, Request};
use crate::response::CompletedResponse;
use serde::de::DeserializeOwned;
use std::io::{self, Read, Write};
use std::process::ExitCode;

/// What a module wants to do with its validated input.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Issue this request
    Call(Request),
    /// Emit this result without calling the host
    Skip(Output),
}

/// The business logic of one guest module.
pub trait GuestModule {
    /// Module name used in log fields.
    const NAME: &'static str;

    /// The JSON object read from standard input.
    type Input: DeserializeOwned;

    /// Validates the input and decides on a request.
    ///
    /// Every validation failure must be returned from here, before any
    /// buffer is built or host call made.
    ///
    /// # Errors
    ///
    /// Returns a decode or validation error for unusable input.
    fn plan(&self, input: Self::Input, config: &GuestConfig) -> Result<Plan, GuestError>;

    /// Turns the retrieved response into the result to emit.
    ///
    /// # Errors
    ///
    /// Returns an error if the response does not represent success.
    fn complete(&self, response: CompletedResponse) -> Result<Emission, GuestError>;
}

/// Runs one call cycle of `module` and writes exactly one result.
pub fn run_module<M, H, R, W>(
    module: &M,
    host: H,
    config: &GuestConfig,
    reader: R,
    writer: W,
) -> ExitSignal
where
    M: GuestModule,
    H: HostImports,
    R: Read,
    W: Write,
{
    let mut cycle = Cycle::new(M::NAME);

    let emission = match drive(module, host, config, reader, &mut cycle) {
        Ok(emission) => emission,
        Err(err) => {
            tracing::warn!(module = M::NAME, stage = %cycle.state(), error = %err, "Call cycle failed");
            cycle.advance(CycleState::Failed);
            Emission::Json(Output::failure(&err))
        }
    };

    let signal = OutputEncoder::new(writer).emit(&emission);
    cycle.advance(CycleState::Emitted);
    signal
}

fn drive<M, H, R>(
    module: &M,
    host: H,
    config: &GuestConfig,
    reader: R,
    cycle: &mut Cycle,
) -> Result<Emission, GuestError>
where
    M: GuestModule,
    H: HostImports,
    R: Read,
{
    let input: M::Input = read_input(reader)?;
    cycle.advance(CycleState::InputDecoded);

    let plan = module.plan(input, config)?;
    cycle.advance(CycleState::Validated);

    let request = match plan {
        Plan::Call(request) => request,
        Plan::Skip(output) => {
            tracing::debug!(module = M::NAME, "Nothing to send; skipping host call");
            return Ok(Emission::Json(output));
        }
    };

    let prepared = request.prepare()?;
    cycle.advance(CycleState::RequestBuilt);

    let completed = send(host, &prepared, cycle)?;
    let emission = module.complete(completed)?;
    cycle.advance(CycleState::ResponseExtracted);
    Ok(emission)
}

/// Lends `prepared`, performs it and copies the response out.
///
/// A lend failure leaves the cycle at `RequestBuilt`: the host is never
/// reached.
fn send<H: HostImports>(
    host: H,
    prepared: &PreparedRequest,
    cycle: &mut Cycle,
) -> Result<CompletedResponse, GuestError> {
    let lent = prepared.lend()?;
    let mut invoker = HostCallInvoker::new(host);
    cycle.advance(CycleState::Invoked);
    let completed = CompletedResponse::from_raw(invoker.exchange(&lent)?);
    cycle.advance(CycleState::Succeeded);
    Ok(completed)
}

fn read_input<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<T, GuestError> {
    let mut raw = Vec::new();
    reader
        .read_to_end(&mut raw)
        .map_err(|e| GuestError::decode(format!("input: {e}")))?;
    serde_json::from_slice(&raw).map_err(|e| GuestError::decode(format!("input: {e}")))
}

/// Runs `module` against the process's standard streams and host.
///
/// Configuration comes from the environment and logging goes to stderr.
pub fn run_stdio<M: GuestModule>(module: M) -> ExitCode {
    let stdout = io::stdout().lock();

    let config = match GuestConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            let err = GuestError::validation("config", err.to_string());
            return OutputEncoder::new(stdout).emit_error(&err).into();
        }
    };

    if let Err(err) = init_logging(&config.logging) {
        eprintln!("warning: {err}");
    }

    run_module(&module, platform_host(), &config, io::stdin().lock(), stdout).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;
    use crate::types::HttpMethod;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct EchoInput {
        url: String,
        #[serde(default)]
        skip: bool,
    }

    struct Echo;

    impl GuestModule for Echo {
        const NAME: &'static str = "echo";
        type Input = EchoInput;

        fn plan(&self, input: EchoInput, _config: &GuestConfig) -> Result<Plan, GuestError> {
            if input.skip {
                return Ok(Plan::Skip(Output::success("skipped")));
            }
            Request::builder(HttpMethod::Get, input.url)
                .build()
                .map(Plan::Call)
        }

        fn complete(&self, response: CompletedResponse) -> Result<Emission, GuestError> {
            let response = response.require_success("echo")?;
            Ok(Output::success(response.body_text().unwrap_or_default()).into())
        }
    }

    fn run(host: &mut MockHost, input: &str) -> (ExitSignal, String) {
        let mut out = Vec::new();
        let signal = run_module(
            &Echo,
            host,
            &GuestConfig::default(),
            input.as_bytes(),
            &mut out,
        );
        (signal, String::from_utf8(out).unwrap())
    }

    #[test]
    fn success_path_emits_one_object() {
        let mut host = MockHost::responding(200, "pong");
        let (signal, out) = run(&mut host, r#"{"url":"https://example.com/ping"}"#);

        assert!(signal.is_success());
        assert_eq!(out, "{\"success\":true,\"message\":\"pong\"}\n");
        assert_eq!(host.request_count(), 1);
    }

    #[test]
    fn malformed_input_fails_without_host_call() {
        let mut host = MockHost::default();
        let (signal, out) = run(&mut host, "not json");

        assert_eq!(signal, ExitSignal::Failure);
        assert!(out.starts_with("{\"success\":false,\"error\":\"failed to decode input: "));
        assert_eq!(host.request_count(), 0);
    }

    #[test]
    fn invalid_url_fails_without_host_call() {
        let mut host = MockHost::default();
        let (signal, _) = run(&mut host, r#"{"url":"nope"}"#);
        assert_eq!(signal, ExitSignal::Failure);
        assert_eq!(host.request_count(), 0);
    }

    #[test]
    fn skip_emits_without_host_call() {
        let mut host = MockHost::default();
        let (signal, out) = run(&mut host, r#"{"url":"","skip":true}"#);
        assert!(signal.is_success());
        assert_eq!(out, "{\"success\":true,\"message\":\"skipped\"}\n");
        assert_eq!(host.request_count(), 0);
    }

    #[test]
    fn host_failure_is_reported() {
        let mut host = MockHost::failing(0xFFFF_FFFE);
        let (signal, out) = run(&mut host, r#"{"url":"https://example.com"}"#);
        assert_eq!(signal, ExitSignal::Failure);
        assert_eq!(
            out,
            "{\"success\":false,\"error\":\"HTTP request failed: URL not allowed\"}\n"
        );
    }

    fn built_cycle() -> Cycle {
        let mut cycle = Cycle::new("echo");
        cycle.advance(CycleState::InputDecoded);
        cycle.advance(CycleState::Validated);
        cycle.advance(CycleState::RequestBuilt);
        cycle
    }

    #[test]
    fn lend_failure_stops_before_invoked() {
        let prepared =
            PreparedRequest::from_parts(b"GET".to_vec(), Vec::new(), None, b"{}".to_vec());
        let mut host = MockHost::default();
        let mut cycle = built_cycle();

        let err = send(&mut host, &prepared, &mut cycle).unwrap_err();

        assert_eq!(err.to_string(), "cannot lend an empty url buffer to the host");
        assert_eq!(cycle.state(), CycleState::RequestBuilt);
        assert_eq!(host.request_count(), 0);
    }

    #[test]
    fn send_advances_through_invoked() {
        let prepared = Request::builder(HttpMethod::Get, "https://example.com")
            .build()
            .unwrap()
            .prepare()
            .unwrap();
        let mut host = MockHost::responding(200, "ok");
        let mut cycle = built_cycle();

        let completed = send(&mut host, &prepared, &mut cycle).unwrap();

        assert_eq!(completed.status(), 200);
        assert_eq!(cycle.state(), CycleState::Succeeded);
    }

    #[test]
    fn upstream_failure_is_reported() {
        let mut host = MockHost::responding(500, "");
        let (signal, out) = run(&mut host, r#"{"url":"https://example.com"}"#);
        assert_eq!(signal, ExitSignal::Failure);
        assert!(out.contains("echo request failed with status: 500"));
    }
}
