//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter for the HTTP server when `RUST_LOG` is unset.
pub const SERVER_FILTER: &str = "mealplanner=info,tower_http=info";

/// Filter for the admin CLI: only warnings, so command output stays readable.
pub const ADMIN_FILTER: &str = "mealplanner=warn";

fn filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install a stderr fmt subscriber. `RUST_LOG` overrides `default_directives`.
pub fn init(default_directives: &str) {
    tracing_subscriber::registry()
        .with(filter(default_directives))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_default_filters_parse() {
        assert!(EnvFilter::try_new(SERVER_FILTER).is_ok());
        assert!(EnvFilter::try_new(ADMIN_FILTER).is_ok());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_admin_filter_reports_environment_fallback() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(ADMIN_FILTER))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(move || writer.clone()),
            );

        let env = tracing::subscriber::with_default(subscriber, || {
            Environment::from("staging".to_string())
        });

        assert_eq!(env, Environment::Production);
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Unknown environment 'staging'"));
    }
}
