use anyhow::Context;
use veranda_domain::AppConfig;
use veranda_kernel::config::load_config;
use veranda_logger::Logger;
use veranda_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: AppConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = {
        let builder = Logger::builder()
            .name(env!("CARGO_PKG_NAME"))
            .env_filter(cfg.logging.level.clone());
        match &cfg.logging.path {
            Some(path) => builder.path(path).init(),
            None => builder.init(),
        }
    }?;

    Server::builder().config(cfg).build().await?.run().await
}
