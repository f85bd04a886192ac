use camsentry::{
    logger, DeviceClient, DeviceConfig, MonitorSession, OutputFormat, TemplateKey,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    log::info!("🔍 Checking device environment...");

    let config = DeviceConfig::from_env();
    match &config.base_url {
        Some(url) => log::info!("CAMSENTRY_DEVICE_URL: {}", url),
        None => {
            log::error!("❌ CAMSENTRY_DEVICE_URL is not set");
            log::warn!("💡 Point it at your camera device, e.g. http://192.168.1.42");
            return Err("missing device URL".into());
        }
    }

    let delay_seconds: u32 = env::var("CAMSENTRY_DELAY_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    logger::log_config_info(&config);
    logger::log_startup_info(
        "camsentry",
        env!("CARGO_PKG_VERSION"),
        config.base_url.as_deref().unwrap_or_default(),
    );

    log::info!("🔄 Creating device client...");
    let client = match DeviceClient::new(config) {
        Ok(client) => {
            log::info!("✅ Device client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize device client: {}", e);
            return Err(e.into());
        }
    };

    let mut session = MonitorSession::new(client);
    session.set_template(TemplateKey::Default);
    session.toggle_format(OutputFormat::ShortAlert);

    log::info!("📸 Capturing image pair ({}s delay)...", delay_seconds);
    let capture_timer = logger::timer("capture_pair");
    match session.capture(delay_seconds).await {
        Ok(pair) => {
            log::info!("✅ Image pair captured!");
            match pair.decoded_sizes() {
                Ok((first, second)) => {
                    log::info!("🖼️  Image sizes: {} and {} JPEG bytes", first, second)
                }
                Err(e) => log::warn!("⚠️  Could not decode image payloads: {}", e),
            }
        }
        Err(e) => {
            log::error!("❌ Capture failed: {}", e);
            log::warn!("💡 Is the device reachable and the camera initialized?");
            return Err(e.into());
        }
    }
    drop(capture_timer);

    if let Some(prompt) = session.current_prompt() {
        log::info!("📝 Composed prompt:");
        for line in prompt.lines() {
            log::info!("   {}", line);
        }
    }

    log::info!("🤖 Sending images and prompt for analysis...");
    let analysis_timer = logger::timer("analyze");
    match session.analyze().await {
        Ok(report) => {
            log::info!("✅ Analysis complete!");
            log::info!("📋 Change report:");
            for line in report.lines() {
                log::info!("   {}", line);
            }
        }
        Err(e) => {
            log::error!("❌ Analysis failed: {}", e);
            return Err(e.into());
        }
    }
    drop(analysis_timer);

    log::info!("🧹 Resetting device buffers...");
    match session.reset().await {
        Ok(()) => log::info!("✅ Device reset, ready for a new capture"),
        Err(e) => log::warn!("⚠️  Reset failed: {}", e),
    }

    log::info!("🎉 Workflow complete!");
    Ok(())
}
