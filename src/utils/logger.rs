use tracing::{debug, error, info, warn};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize logging. `RUST_LOG` wins over `default_level`.
///
/// Logs go to stderr so the report on stdout stays readable.
pub fn init_logger(default_level: &str) -> anyhow::Result<()> {
    let timer = ChronoUtc::rfc_3339();

    let format_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_timer(timer)
        .compact();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("investment_time_machine={}", default_level)))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(format_layer)
        .try_init()?;

    Ok(())
}

/// Tags every event from one component with a `component` field.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    component: &'static str,
}

impl Logger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn info(&self, message: &str) {
        info!(component = self.component, "{}", message);
    }

    pub fn info_with_data<T: std::fmt::Debug>(&self, message: &str, data: T) {
        info!(component = self.component, data = ?data, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!(component = self.component, "{}", message);
    }

    pub fn warn_with_error(&self, message: &str, error: &dyn std::error::Error) {
        warn!(component = self.component, error = %error, "{}", message);
    }

    pub fn error_with_error(&self, message: &str, error: &dyn std::error::Error) {
        error!(component = self.component, error = %error, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        debug!(component = self.component, "{}", message);
    }
}

pub fn log_state_transition(from: &str, to: &str, reason: &str) {
    info!("TRANSITION: {} → {} ({})", from, to, reason);
}

/// [FETCH] - Price history requests
pub fn log_fetch(message: &str) {
    info!("FETCH: {}", message);
}

/// [GENERATE] - Model requests
pub fn log_generate(message: &str) {
    info!("GENERATE: {}", message);
}

/// Performance timing helper
pub struct Timer {
    start: std::time::Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        Self {
            start: std::time::Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn log_elapsed(&self) {
        info!("{} completed in {:.1}ms", self.name, self.elapsed_ms());
    }
}
