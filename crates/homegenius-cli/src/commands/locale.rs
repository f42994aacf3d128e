use anyhow::Result;
use colored::Colorize;
use homegenius_application::AppContext;
use homegenius_core::locale::Registry;

pub fn list(context: &AppContext) {
    let active = context.locale().active();
    for config in Registry::builtin().iter() {
        let marker = if config.id == active { "*" } else { " " };
        let line = format!(
            "{} {:<6} {:<15} {}",
            marker, config.id, config.country, config.currency_code
        );
        if config.id == active {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
}

pub fn show(context: &AppContext) {
    let config = context.locale().active_config();
    println!("{} ({}, {})", config.id.bold(), config.country, config.currency_code);
    println!("  {}", context.locale().format_price(1_000_000.0));
    println!("  {}", context.locale().format_area(120.0));
}

pub async fn set(context: &AppContext, id: &str) -> Result<()> {
    context.locale().set_active(id).await?;

    let active = context.locale().active();
    if active == id {
        println!("{}", format!("Locale set to {}", active).green());
    } else {
        println!(
            "{}",
            format!(
                "Unknown locale '{}'; still using {}. Available: {}",
                id,
                active,
                context.locale().available_locales().join(", ")
            )
            .yellow()
        );
    }
    Ok(())
}
