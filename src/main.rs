use anyhow::Result;
use promo_funnel::utils::logging;
use promo_funnel::{App, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load("funnel.toml")?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    // 初始化并运行应用
    let mut app = App::initialize(&config);
    if let Some(url) = app.run().await? {
        info!("🌐 已跳转: {}", url);
    }

    Ok(())
}
