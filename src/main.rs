use anyhow::Result;
use quizbot::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init_verbose(config.verbose_logging);

    let ask = config
        .ask_input
        .clone()
        .map(|input| (input, config.ask_context.clone()));

    let mut app = App::initialize(config).await?;

    // 设置了问题时只执行一次问答
    if let Some((input, context)) = ask {
        let reply = app.ask(&input, context.as_deref()).await?;
        println!("{}", reply);
        return Ok(());
    }

    let _report = app.run().await?;

    Ok(())
}
