use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    // RUST_LOG=triage_viewer=debug,wgpu=warn
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("triage_viewer=info,wgpu=warn,naga=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
