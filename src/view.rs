//! Presentation side of the browser.
//!
//! The core never renders anything itself. [`Controller`](crate::controller::Controller)
//! pushes state changes into a [`PresentationSink`], and each front end
//! provides its own implementation. [`ConsoleView`] is the one the CLI uses.

use std::io::{self, Write};

use log::warn;

use crate::model::Like;
use crate::recipe::Recipe;
use crate::search::SearchSession;
use crate::shopping_list::ShoppingItem;

const FRACTION_TOLERANCE: f64 = 0.01;
const DENOMINATORS: [u64; 4] = [2, 3, 4, 8];

/// The area of the screen a loader or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Search,
    Recipe,
}

/// Receives rendering commands. Every method defaults to doing nothing, so
/// a sink only implements the parts of the screen it has.
pub trait PresentationSink {
    fn render_loader(&mut self, _panel: Panel) {}
    fn clear_loader(&mut self, _panel: Panel) {}
    fn notify_error(&mut self, _panel: Panel, _message: &str) {}

    fn clear_search_results(&mut self) {}
    fn render_search_results(&mut self, _session: &SearchSession) {}
    fn highlight_selected(&mut self, _id: &str) {}

    fn clear_recipe(&mut self) {}
    fn render_recipe(&mut self, _recipe: &Recipe, _liked: bool) {}
    fn update_serving_amounts(&mut self, _recipe: &Recipe) {}

    fn clear_list(&mut self) {}
    fn render_list_item(&mut self, _item: &ShoppingItem) {}
    fn delete_list_item(&mut self, _id: &str) {}

    fn toggle_like_button(&mut self, _liked: bool) {}
    fn render_like(&mut self, _like: &Like) {}
    fn delete_like(&mut self, _id: &str) {}
    fn toggle_likes_menu(&mut self, _visible: bool) {}
}

/// Shorten a title to whole words fitting in `limit` characters, counting
/// word lengths without the spaces between them.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut total = 0;
    let words: Vec<&str> = title
        .split(' ')
        .take_while(|word| {
            total += word.chars().count();
            total <= limit
        })
        .collect();
    format!("{} ...", words.join(" "))
}

/// Render a quantity the way recipes write it: "1 1/2", "3/4", "2".
///
/// Values that are not close to a kitchen fraction fall back to at most
/// two decimals. `None` renders as an empty string.
pub fn format_count(count: Option<f64>) -> String {
    let Some(count) = count else {
        return String::new();
    };
    if !count.is_finite() || count < 0.0 {
        return format_decimal(count);
    }

    let whole = count.trunc();
    let fraction = count - whole;
    if fraction < FRACTION_TOLERANCE {
        return format!("{}", whole as u64);
    }
    if 1.0 - fraction < FRACTION_TOLERANCE {
        return format!("{}", whole as u64 + 1);
    }

    let best = DENOMINATORS
        .iter()
        .map(|&d| {
            let n = (fraction * d as f64).round();
            (n as u64, d, (fraction - n / d as f64).abs())
        })
        .filter(|&(n, d, _)| n > 0 && n < d)
        .min_by(|a, b| a.2.total_cmp(&b.2));

    match best {
        Some((n, d, error)) if error < FRACTION_TOLERANCE => {
            if whole >= 1.0 {
                format!("{} {}/{}", whole as u64, n, d)
            } else {
                format!("{}/{}", n, d)
            }
        }
        _ => format_decimal(count),
    }
}

fn format_decimal(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_ingredient(count: Option<f64>, unit: &str, ingredient: &str) -> String {
    [format_count(count).as_str(), unit, ingredient]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain-text sink writing to any [`Write`] target.
pub struct ConsoleView<W: Write> {
    out: W,
    title_limit: usize,
}

impl ConsoleView<io::Stdout> {
    pub fn stdout(title_limit: usize) -> Self {
        Self::new(io::stdout(), title_limit)
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W, title_limit: usize) -> Self {
        Self { out, title_limit }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Failed to write to console: {}", e);
        }
    }

    fn render_ingredients(&mut self, recipe: &Recipe) {
        for ing in recipe.ingredients() {
            let text = format_ingredient(ing.count, &ing.unit, &ing.ingredient);
            self.line(&format!("  - {}", text));
        }
    }
}

impl<W: Write> PresentationSink for ConsoleView<W> {
    fn notify_error(&mut self, _panel: Panel, message: &str) {
        self.line(&format!("error: {}", message));
    }

    fn render_search_results(&mut self, session: &SearchSession) {
        if session.is_empty() {
            self.line(&format!("No recipes found for \"{}\"", session.query));
            return;
        }
        for summary in &session.results {
            let title = limit_title(&summary.title, self.title_limit);
            self.line(&format!("{:<10} {} ({})", summary.id, title, summary.publisher));
        }
    }

    fn render_recipe(&mut self, recipe: &Recipe, liked: bool) {
        let marker = if liked { " [liked]" } else { "" };
        self.line(&format!("{}{}", recipe.title, marker));
        self.line(&format!("by {}", recipe.publisher));
        self.line(&format!(
            "{} minutes, {} servings",
            recipe.prep_time_minutes(),
            recipe.servings()
        ));
        self.render_ingredients(recipe);
        if !recipe.source_url.is_empty() {
            self.line(&format!("Directions: {}", recipe.source_url));
        }
    }

    fn update_serving_amounts(&mut self, recipe: &Recipe) {
        self.line(&format!("Scaled to {} servings:", recipe.servings()));
        self.render_ingredients(recipe);
    }

    fn clear_list(&mut self) {
        self.line("Shopping list:");
    }

    fn render_list_item(&mut self, item: &ShoppingItem) {
        let text = format_ingredient(item.count, &item.unit, &item.ingredient);
        self.line(&format!("  [{}] {}", item.id, text));
    }

    fn toggle_like_button(&mut self, liked: bool) {
        self.line(if liked { "Liked" } else { "Unliked" });
    }

    fn render_like(&mut self, like: &Like) {
        let title = limit_title(&like.title, self.title_limit);
        self.line(&format!("{:<10} {} ({})", like.id, title, like.publisher));
    }

    fn toggle_likes_menu(&mut self, visible: bool) {
        if visible {
            self.line("Liked recipes:");
        } else {
            self.line("No liked recipes yet");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeSummary;

    #[test]
    fn test_limit_title() {
        assert_eq!(limit_title("Pizza Dip", 18), "Pizza Dip");
        assert_eq!(
            limit_title("Pasta with tomato and spinach", 18),
            "Pasta with tomato and ..."
        );
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(None), "");
        assert_eq!(format_count(Some(2.0)), "2");
        assert_eq!(format_count(Some(0.5)), "1/2");
        assert_eq!(format_count(Some(1.5)), "1 1/2");
        assert_eq!(format_count(Some(0.75)), "3/4");
        assert_eq!(format_count(Some(1.0 / 3.0)), "1/3");
        assert_eq!(format_count(Some(0.375)), "3/8");
        assert_eq!(format_count(Some(2.999)), "3");
        assert_eq!(format_count(Some(0.1)), "0.1");
    }

    #[test]
    fn test_console_renders_results_and_items() {
        let mut view = ConsoleView::new(Vec::new(), 18);
        let session = SearchSession::new(
            "pasta",
            vec![RecipeSummary {
                id: "1".to_string(),
                title: "Pasta with tomato and spinach".to_string(),
                publisher: "Two Peas".to_string(),
                image_url: String::new(),
            }],
        );

        view.render_search_results(&session);
        view.render_list_item(&ShoppingItem {
            id: "item-1".to_string(),
            count: Some(1.5),
            unit: "cup".to_string(),
            ingredient: "flour".to_string(),
        });

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.contains("Pasta with tomato and ... (Two Peas)"));
        assert!(output.contains("[item-1] 1 1/2 cup flour"));
    }

    #[test]
    fn test_console_likes_menu_header() {
        let mut view = ConsoleView::new(Vec::new(), 18);
        view.toggle_likes_menu(false);
        view.toggle_likes_menu(true);
        view.render_like(&Like {
            id: "35477".to_string(),
            title: "Pizza Dip".to_string(),
            publisher: "Closet Cooking".to_string(),
            image_url: String::new(),
        });

        let output = String::from_utf8(view.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "No liked recipes yet");
        assert_eq!(lines[1], "Liked recipes:");
        assert!(lines[2].contains("Pizza Dip (Closet Cooking)"));
    }

    #[test]
    fn test_console_reports_empty_search() {
        let mut view = ConsoleView::new(Vec::new(), 18);
        view.render_search_results(&SearchSession::new("zzz", Vec::new()));

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.contains("No recipes found for \"zzz\""));
    }
}
