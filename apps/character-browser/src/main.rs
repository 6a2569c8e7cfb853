use character_browser::AppOptions;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = AppOptions::from_env()?;

    println!("=== Character Browser ===");
    println!("Type a command and press Enter:");
    println!("  n - next page");
    println!("  p - previous page");
    println!("  r - retry after an error");
    println!("  q - quit");

    character_browser::run(options)
}
