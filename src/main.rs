use std::sync::Arc;

mod assets;
mod config;
mod handler;
mod http;
mod logger;
mod server;
mod vfs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    // The asset table is built once here and shared by reference from then on.
    let table = Arc::new(assets::AssetTable::builtin());
    let state = Arc::new(config::AppState::new(cfg, table));

    logger::log_server_start(&addr, &state.config);
    server::run(listener, state).await?;
    Ok(())
}
