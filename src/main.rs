use std::env;

use log::debug;
use recipe_browser::{app_from_config, BrowserConfig, ConsoleView, Controller, ServingsChange};

const USAGE: &str = "Usage: recipe-browser <search QUERY | show ID [SERVINGS] | list ID | like ID | likes>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(USAGE)?;

    let config = BrowserConfig::load()?;
    debug!("{:#?}", config);

    let app = app_from_config(&config)?;
    let view = ConsoleView::stdout(config.display.title_limit);
    let mut controller = Controller::new(app, view);

    match command.as_str() {
        "search" => {
            let query = args[2..].join(" ");
            if query.trim().is_empty() {
                return Err(USAGE.into());
            }
            controller.control_search(&query).await?;
        }
        "show" => {
            let id = args.get(2).ok_or(USAGE)?;
            controller.control_recipe(id).await?;
            if let Some(servings) = args.get(3) {
                let servings: u32 = servings.parse()?;
                controller.control_servings(ServingsChange::Set(servings))?;
            }
        }
        "list" => {
            let id = args.get(2).ok_or(USAGE)?;
            controller.control_recipe(id).await?;
            controller.control_list()?;
        }
        "like" => {
            let id = args.get(2).ok_or(USAGE)?;
            controller.control_recipe(id).await?;
            controller.control_like()?;
        }
        "likes" => controller.control_load(),
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
