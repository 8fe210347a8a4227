use std::ffi::OsStr;
use std::net::{TcpListener, TcpStream, ToSocketAddrs};
use std::process::{Command, Output};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Env var naming the live server used by these tests.
pub const TEST_ADDRESS_ENV: &str = "KVMARK_TEST_ADDRESS";
const DEFAULT_TEST_ADDRESS: &str = "127.0.0.1:6379";
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Returns the live server address, or `None` (after a note on stderr) when
/// nothing is listening there.
///
/// # Errors
///
/// Returns an error if the configured address cannot be resolved.
pub fn live_address_or_skip() -> Result<Option<String>, String> {
    let address =
        std::env::var(TEST_ADDRESS_ENV).unwrap_or_else(|_| DEFAULT_TEST_ADDRESS.to_owned());
    let host_port = address
        .strip_prefix("redis://")
        .unwrap_or(&address)
        .trim_end_matches('/')
        .to_owned();
    let socket = host_port
        .to_socket_addrs()
        .map_err(|err| format!("resolve {} failed: {}", host_port, err))?
        .next()
        .ok_or_else(|| format!("no socket address for {}", host_port))?;

    if TcpStream::connect_timeout(&socket, PROBE_TIMEOUT).is_err() {
        eprintln!(
            "Skipping live test: no server at {} (set {}).",
            address, TEST_ADDRESS_ENV
        );
        return Ok(None);
    }
    Ok(Some(address))
}

/// Address on which nothing is listening.
///
/// # Errors
///
/// Returns an error if a probe listener cannot be bound.
pub fn closed_address() -> Result<String, String> {
    let listener =
        TcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(addr.to_string())
}

/// Key prefix unique to one test invocation.
#[must_use]
pub fn unique_prefix(test: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    format!("kvmark-test:{}:{}:{}", test, std::process::id(), nanos)
}

/// Builds a current-thread runtime for async test bodies.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("runtime build failed: {}", err))
}

/// Run the `kvmark` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_kvmark<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = kvmark_bin()?;
    Command::new(bin)
        .args(args)
        .env("KVMARK_LOG", "error")
        .env_remove("KVMARK_ADDRESS")
        .output()
        .map_err(|err| format!("run kvmark failed: {}", err))
}

fn kvmark_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_kvmark").map_or_else(
        || Err("CARGO_BIN_EXE_kvmark missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
