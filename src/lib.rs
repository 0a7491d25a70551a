pub mod actions; // Preview-then-save and deferred print
pub mod config;
pub mod document; // Render-ready prescription model
pub mod error;
pub mod invoice; // Lab invoices and the lab order desk
pub mod invoice_list; // Invoice list filtering and ordering
pub mod models;
pub mod pdf; // Fixed-template PDF rendering
pub mod resolve; // Canonical patient fields

pub use error::ClinicError;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber, honouring `RUST_LOG`. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
