//! Shared test utilities and fixtures for ftplink integration tests.

pub use ftplink_core::{
    ConfigurationError, EndpointError, FtpEndpoint, FtpEndpointFactory, InMemoryRegistry,
    ParameterStore, ReferenceResolutionError,
};

pub use mocks::{FailingApplier, RecordingApplier};

/// Test logging setup
pub mod logging {
    use parking_lot::Mutex;
    use std::io;
    use std::sync::{Arc, Once};
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    static INIT: Once = Once::new();

    /// Install a test subscriber once per process (`RUST_LOG` controls the level)
    pub fn init() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ftplink_core=debug"));
            let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
        });
    }

    /// In-memory log sink
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with every event (all levels) recorded on this thread.
    ///
    /// Returns the result of `f` and the formatted log output.
    pub fn capture<R>(f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = fmt()
            .with_max_level(LevelFilter::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = {
            let _guard = subscriber.set_default();
            f()
        };

        let output = String::from_utf8_lossy(&logs.0.lock()).into_owned();
        (result, output)
    }
}

/// Test fixtures
pub mod fixtures {
    use super::*;
    use std::sync::Arc;

    pub const SITE_COMMAND_BEAN: &str = "myCmdBean";
    pub const SITE_COMMAND: &str = "SITE CHMOD 600";

    /// Registry with a SITE command bound under [`SITE_COMMAND_BEAN`]
    pub fn registry() -> Arc<InMemoryRegistry> {
        Arc::new(InMemoryRegistry::new().with(SITE_COMMAND_BEAN, SITE_COMMAND.to_string()))
    }

    /// Factory with the default binder and [`registry`]
    pub fn factory() -> FtpEndpointFactory {
        logging::init();
        FtpEndpointFactory::new(registry())
    }

    /// Build a parameter store from JSON object literal pairs
    pub fn params(pairs: &[(&str, serde_json::Value)]) -> ParameterStore {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }
}
