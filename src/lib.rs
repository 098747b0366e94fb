pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod ingredients;
pub mod likes;
pub mod model;
pub mod navigation;
pub mod recipe;
pub mod search;
pub mod shopping_list;
pub mod transport;
pub mod view;

pub use app::{App, LikeToggle, Outcome, RecipeState, SearchState, ServingsChange};
pub use config::BrowserConfig;
pub use controller::Controller;
pub use error::{BrowserError, StorageError, TransportError};
pub use ingredients::{parse as parse_ingredient, ParsedIngredient};
pub use likes::{FileStore, LikesCollection, LikesStore, MemoryStore, LIKES_STORAGE_KEY};
pub use model::{Like, RawRecipe, RecipeSummary};
pub use recipe::Recipe;
pub use search::SearchSession;
pub use shopping_list::{ShoppingItem, ShoppingList};
pub use transport::{HttpTransport, RecipeTransport};
pub use view::{ConsoleView, PresentationSink};

use std::sync::Arc;

/// Build an [`App`] wired to the HTTP catalog and file-backed likes
/// described by `config`.
pub fn app_from_config(config: &BrowserConfig) -> Result<App, BrowserError> {
    let transport = HttpTransport::new(&config.api)?;
    let store = FileStore::new(&config.storage.dir, LIKES_STORAGE_KEY);
    App::new(
        Arc::new(transport),
        Box::new(store),
        config.recipe.default_servings,
    )
}
