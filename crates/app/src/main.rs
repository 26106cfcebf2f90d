fn main() -> anyhow::Result<()> {
    let app = hbnb_app::App::bootstrap(hbnb_app::AppConfig::from_env())?;

    for (type_name, count) in app.entity_counts() {
        tracing::info!(type_name, count, "loaded");
    }
    Ok(())
}
