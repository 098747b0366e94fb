use log::error;

use crate::app::{App, LikeToggle, Outcome, RecipeState, SearchState, ServingsChange};
use crate::error::BrowserError;
use crate::view::{Panel, PresentationSink};

/// Message shown when the catalog cannot be reached.
pub const LOAD_FAILED_MESSAGE: &str = "Load failed - please wait a few moments and try again.";

/// Runs user intents against an [`App`] and pushes the results to a sink.
pub struct Controller<S: PresentationSink> {
    app: App,
    sink: S,
}

impl<S: PresentationSink> Controller<S> {
    pub fn new(app: App, sink: S) -> Self {
        Self { app, sink }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (App, S) {
        (self.app, self.sink)
    }

    /// Show the restored likes, as done once at startup.
    pub fn control_load(&mut self) {
        self.sink.toggle_likes_menu(self.app.likes_menu_visible());
        for like in self.app.likes().iter() {
            self.sink.render_like(like);
        }
    }

    pub async fn control_search(&mut self, query: &str) -> Result<Outcome, BrowserError> {
        if query.trim().is_empty() {
            return Ok(Outcome::Ignored);
        }

        self.sink.clear_search_results();
        self.sink.render_loader(Panel::Search);
        let result = self.app.search(query).await;
        self.sink.clear_loader(Panel::Search);

        match result {
            Ok(Outcome::Applied) => {
                if let SearchState::Ready(session) = self.app.search_state() {
                    self.sink.render_search_results(session);
                }
                Ok(Outcome::Applied)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!("Search failed: {}", e);
                self.sink.notify_error(Panel::Search, LOAD_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    pub async fn control_recipe(&mut self, fragment: &str) -> Result<Outcome, BrowserError> {
        let Some(id) = crate::navigation::recipe_id_from_fragment(fragment) else {
            return Ok(Outcome::Ignored);
        };

        self.sink.clear_recipe();
        self.sink.render_loader(Panel::Recipe);
        if self.app.search_results().is_some() {
            self.sink.highlight_selected(&id);
        }

        let result = self.app.select_recipe(&id).await;
        self.sink.clear_loader(Panel::Recipe);

        match result {
            Ok(Outcome::Applied) => {
                if let (RecipeState::Ready, Some(recipe)) =
                    (self.app.recipe_state(), self.app.current_recipe())
                {
                    self.sink.render_recipe(recipe, self.app.is_current_liked());
                }
                Ok(Outcome::Applied)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!("Loading recipe {} failed: {}", id, e);
                self.sink.notify_error(Panel::Recipe, LOAD_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    pub fn control_servings(&mut self, change: ServingsChange) -> Result<u32, BrowserError> {
        let servings = self.app.update_servings(change)?;
        if let Some(recipe) = self.app.current_recipe() {
            self.sink.update_serving_amounts(recipe);
        }
        Ok(servings)
    }

    /// Put the current recipe's ingredients on the shopping list,
    /// replacing what was there.
    pub fn control_list(&mut self) -> Result<usize, BrowserError> {
        let items = self.app.add_current_to_list()?;
        self.sink.clear_list();
        for item in &items {
            self.sink.render_list_item(item);
        }
        Ok(items.len())
    }

    pub fn control_delete_item(&mut self, id: &str) {
        if self.app.delete_list_item(id).is_some() {
            self.sink.delete_list_item(id);
        }
    }

    pub fn control_update_count(&mut self, id: &str, value: f64) -> Result<(), BrowserError> {
        self.app.update_list_count(id, value)
    }

    pub fn control_like(&mut self) -> Result<LikeToggle, BrowserError> {
        let toggle = self.app.toggle_like()?;
        let liked = matches!(toggle, LikeToggle::Liked(_));
        self.sink.toggle_like_button(liked);
        // Menu header goes out before the entry it introduces.
        self.sink.toggle_likes_menu(self.app.likes_menu_visible());
        match &toggle {
            LikeToggle::Liked(like) => self.sink.render_like(like),
            LikeToggle::Unliked(like) => self.sink.delete_like(&like.id),
        }
        Ok(toggle)
    }
}
