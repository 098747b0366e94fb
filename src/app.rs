//! Application state and the intents that change it.
//!
//! [`App`] owns the four pieces of state the browser works with: the search
//! session, the current recipe, the shopping list and the likes collection.
//! Each slot moves independently. Remote work is split into a `begin_*`
//! step that hands out a ticket and a `finish_*` step that applies the
//! transport result. A ticket that has been overtaken by a newer request is
//! discarded on finish, so a slow earlier response can never replace a newer
//! one. The `search` and `select_recipe` helpers run both steps back to back.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::{BrowserError, TransportError};
use crate::likes::{LikesCollection, LikesStore};
use crate::model::{Like, RawRecipe, RecipeSummary};
use crate::navigation;
use crate::recipe::Recipe;
use crate::search::SearchSession;
use crate::shopping_list::{ShoppingItem, ShoppingList};
use crate::transport::RecipeTransport;

/// Load state of the search slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No search has run yet
    Idle,
    /// A search for `query` is in flight
    Loading { query: String },
    /// Results of the latest search
    Ready(SearchSession),
    /// The latest search failed; earlier results are gone
    Failed { query: String, message: String },
}

/// Load state of the recipe slot. The recipe itself lives beside it, so a
/// failed load leaves the previous recipe in place.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeState {
    /// No recipe has been requested
    Idle,
    /// Recipe `id` is being fetched
    Loading { id: String },
    /// The current recipe is the one last requested
    Ready,
    /// Fetching `id` failed
    Failed { id: String, message: String },
}

/// Result of finishing a request or running an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The state was updated
    Applied,
    /// A newer request was started in the meantime; the result was dropped
    Superseded,
    /// Nothing to do (blank query or empty location)
    Ignored,
}

/// Handle for a search started with [`App::begin_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Search counter value when the request started
    generation: u64,
    /// Trimmed query text
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Handle for a recipe fetch started with [`App::begin_select_recipe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTicket {
    /// Recipe counter value when the request started
    generation: u64,
    /// Catalog id being fetched
    id: String,
}

impl RecipeTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Requested change to the current recipe's servings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsChange {
    /// One more serving
    Increase,
    /// One fewer serving, rejected below 1
    Decrease,
    /// Jump straight to the given count
    Set(u32),
}

/// What a like toggle did, carrying the affected snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum LikeToggle {
    /// The current recipe was added to the likes
    Liked(Like),
    /// The current recipe was removed from the likes
    Unliked(Like),
}

/// Browser state shared by the controller and the CLI.
pub struct App {
    transport: Arc<dyn RecipeTransport>,
    /// Servings assumed for a freshly fetched recipe
    default_servings: u32,
    search: SearchState,
    /// Bumped by every `begin_search`; older tickets are stale
    search_generation: u64,
    recipe_state: RecipeState,
    /// Bumped by every `begin_select_recipe`
    recipe_generation: u64,
    /// Last recipe that loaded successfully
    recipe: Option<Recipe>,
    /// Created on the first add-to-list
    list: Option<ShoppingList>,
    likes: LikesCollection,
}

impl App {
    /// Create the application state, restoring likes from `store`.
    pub fn new(
        transport: Arc<dyn RecipeTransport>,
        store: Box<dyn LikesStore>,
        default_servings: u32,
    ) -> Result<Self, BrowserError> {
        if default_servings == 0 {
            return Err(BrowserError::InvalidArgument(
                "default servings must be at least 1".to_string(),
            ));
        }

        let likes = LikesCollection::read_storage(store);
        info!("Loaded {} liked recipes", likes.len());

        Ok(Self {
            transport,
            default_servings,
            search: SearchState::Idle,
            search_generation: 0,
            recipe_state: RecipeState::Idle,
            recipe_generation: 0,
            recipe: None,
            list: None,
            likes,
        })
    }

    /// Shared handle to the transport, for callers driving the two-step API.
    pub fn transport(&self) -> Arc<dyn RecipeTransport> {
        Arc::clone(&self.transport)
    }

    // --- Search ---

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Results of the last successful search, if the slot is ready.
    pub fn search_results(&self) -> Option<&SearchSession> {
        match &self.search {
            SearchState::Ready(session) => Some(session),
            _ => None,
        }
    }

    /// Start a search. Prior results are dropped immediately.
    ///
    /// A blank query starts nothing and returns `None`.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.search_generation += 1;
        self.search = SearchState::Loading {
            query: query.to_string(),
        };
        debug!("Search #{} for {:?} started", self.search_generation, query);

        Some(SearchTicket {
            generation: self.search_generation,
            query: query.to_string(),
        })
    }

    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<RecipeSummary>, TransportError>,
    ) -> Result<Outcome, BrowserError> {
        if ticket.generation != self.search_generation {
            debug!("Dropping superseded search for {:?}", ticket.query);
            return Ok(Outcome::Superseded);
        }

        match result {
            Ok(results) => {
                info!("Search for {:?} found {} recipes", ticket.query, results.len());
                self.search = SearchState::Ready(SearchSession::new(ticket.query, results));
                Ok(Outcome::Applied)
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", ticket.query, e);
                self.search = SearchState::Failed {
                    query: ticket.query,
                    message: e.to_string(),
                };
                Err(e.into())
            }
        }
    }

    pub async fn search(&mut self, query: &str) -> Result<Outcome, BrowserError> {
        let Some(ticket) = self.begin_search(query) else {
            return Ok(Outcome::Ignored);
        };
        let transport = self.transport();
        let result = transport.search_recipes(ticket.query()).await;
        self.finish_search(ticket, result)
    }

    // --- Recipe ---

    pub fn recipe_state(&self) -> &RecipeState {
        &self.recipe_state
    }

    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    /// Start loading a recipe. Selecting the current id again re-fetches it.
    pub fn begin_select_recipe(&mut self, id: &str) -> Option<RecipeTicket> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        self.recipe_generation += 1;
        self.recipe_state = RecipeState::Loading { id: id.to_string() };
        debug!("Recipe load #{} for {} started", self.recipe_generation, id);

        Some(RecipeTicket {
            generation: self.recipe_generation,
            id: id.to_string(),
        })
    }

    /// Apply a fetched recipe. On failure the previous recipe stays current.
    pub fn finish_select_recipe(
        &mut self,
        ticket: RecipeTicket,
        result: Result<RawRecipe, TransportError>,
    ) -> Result<Outcome, BrowserError> {
        if ticket.generation != self.recipe_generation {
            debug!("Dropping superseded load of recipe {}", ticket.id);
            return Ok(Outcome::Superseded);
        }

        let recipe = result
            .map_err(BrowserError::from)
            .and_then(|mut raw| {
                if raw.id.is_empty() {
                    raw.id = ticket.id.clone();
                }
                Recipe::from_raw(raw, self.default_servings)
            });

        match recipe {
            Ok(recipe) => {
                info!("Loaded recipe {} ({})", recipe.id, recipe.title);
                self.recipe = Some(recipe);
                self.recipe_state = RecipeState::Ready;
                Ok(Outcome::Applied)
            }
            Err(e) => {
                warn!("Loading recipe {} failed: {}", ticket.id, e);
                self.recipe_state = RecipeState::Failed {
                    id: ticket.id,
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    pub async fn select_recipe(&mut self, id: &str) -> Result<Outcome, BrowserError> {
        let Some(ticket) = self.begin_select_recipe(id) else {
            return Ok(Outcome::Ignored);
        };
        let transport = self.transport();
        let result = transport.fetch_recipe(ticket.id()).await;
        self.finish_select_recipe(ticket, result)
    }

    /// React to a location change such as `#47746`.
    pub async fn on_location_change(&mut self, fragment: &str) -> Result<Outcome, BrowserError> {
        match navigation::recipe_id_from_fragment(fragment) {
            Some(id) => self.select_recipe(&id).await,
            None => Ok(Outcome::Ignored),
        }
    }

    /// Change the current recipe's servings, returning the new count.
    pub fn update_servings(&mut self, change: ServingsChange) -> Result<u32, BrowserError> {
        let recipe = self.recipe.as_mut().ok_or_else(no_current_recipe)?;
        match change {
            ServingsChange::Increase => recipe.increase_servings(),
            ServingsChange::Decrease => recipe.decrease_servings(),
            ServingsChange::Set(servings) => {
                recipe.scale_servings(servings)?;
                Ok(recipe.servings())
            }
        }
    }

    // --- Shopping list ---

    pub fn list(&self) -> Option<&ShoppingList> {
        self.list.as_ref()
    }

    /// Replace the shopping list contents with the current recipe's
    /// ingredients at their current quantities.
    pub fn add_current_to_list(&mut self) -> Result<Vec<ShoppingItem>, BrowserError> {
        let recipe = self.recipe.as_ref().ok_or_else(no_current_recipe)?;
        let list = self.list.get_or_insert_with(ShoppingList::new);
        list.empty();

        let items: Vec<ShoppingItem> = recipe
            .ingredients()
            .iter()
            .map(|ing| list.add_item(ing.count, ing.unit.clone(), ing.ingredient.clone()))
            .collect();
        debug!("Shopping list now holds {} items from {}", items.len(), recipe.id);
        Ok(items)
    }

    pub fn delete_list_item(&mut self, id: &str) -> Option<ShoppingItem> {
        self.list.as_mut()?.delete_item(id)
    }

    pub fn update_list_count(&mut self, id: &str, value: f64) -> Result<(), BrowserError> {
        self.list
            .as_mut()
            .ok_or_else(|| BrowserError::NotFound(format!("shopping item {}", id)))?
            .update_count(id, value)
    }

    // --- Likes ---

    pub fn likes(&self) -> &LikesCollection {
        &self.likes
    }

    /// Whether the current recipe is liked. Always read from the collection.
    pub fn is_current_liked(&self) -> bool {
        self.recipe
            .as_ref()
            .is_some_and(|recipe| self.likes.is_liked(&recipe.id))
    }

    pub fn likes_menu_visible(&self) -> bool {
        !self.likes.is_empty()
    }

    /// Like the current recipe, or unlike it if it is already liked.
    pub fn toggle_like(&mut self) -> Result<LikeToggle, BrowserError> {
        let recipe = self.recipe.as_ref().ok_or_else(no_current_recipe)?;

        if let Some(removed) = self.likes.delete(&recipe.id) {
            info!("Like removed: {}", removed.id);
            return Ok(LikeToggle::Unliked(removed));
        }

        let like = recipe.to_like();
        self.likes.add(like.clone());
        info!("New like added: {}", like.id);
        Ok(LikeToggle::Liked(like))
    }

    /// Remove a like by id, whether or not it is the current recipe.
    pub fn unlike(&mut self, id: &str) -> Option<Like> {
        self.likes.delete(id)
    }
}

fn no_current_recipe() -> BrowserError {
    BrowserError::NotFound("no recipe is currently selected".to_string())
}
