use tracing_subscriber::EnvFilter;

/// 初始化日志（默认 info 级别，可通过 RUST_LOG 覆盖）
pub fn init() {
    init_with_default("info");
}

/// 初始化日志，`verbose` 为真时默认 debug 级别
pub fn init_verbose(verbose: bool) {
    init_with_default(if verbose { "debug" } else { "info" });
}

fn init_with_default(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // 测试中可能被多次调用，重复初始化忽略即可
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
