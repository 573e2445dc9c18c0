use std::sync::Arc;

use crate::models::{IdGenerator, Likes, Recipe, Search, ShoppingList};
use crate::storage::KeyValueStore;

/// Which in-flight request slot a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Recipe,
}

/// Proof of issue for one outgoing request
///
/// Only the most recently issued ticket of each kind may write its response
/// into the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    kind: RequestKind,
    sequence: u64,
}

impl RequestTicket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Default)]
struct Generations {
    search: u64,
    recipe: u64,
}

impl Generations {
    fn slot(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Search => &mut self.search,
            RequestKind::Recipe => &mut self.recipe,
        }
    }

    fn latest(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Search => self.search,
            RequestKind::Recipe => self.recipe,
        }
    }
}

/// The single live instance of every model
///
/// Models never reference each other; anything crossing between them goes
/// through here. Shared between tasks as `tokio::sync::Mutex<AppState>`.
#[derive(Debug)]
pub struct AppState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: ShoppingList,
    pub likes: Likes,
    generations: Generations,
}

impl AppState {
    pub fn new(ids: Box<dyn IdGenerator>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            search: None,
            recipe: None,
            list: ShoppingList::new(ids),
            likes: Likes::new(store),
            generations: Generations::default(),
        }
    }

    /// Issue a ticket for a new request, superseding any earlier one of the same kind
    pub fn begin(&mut self, kind: RequestKind) -> RequestTicket {
        let slot = self.generations.slot(kind);
        *slot += 1;
        RequestTicket {
            kind,
            sequence: *slot,
        }
    }

    pub fn begin_search(&mut self) -> RequestTicket {
        self.begin(RequestKind::Search)
    }

    pub fn begin_recipe_load(&mut self) -> RequestTicket {
        self.begin(RequestKind::Recipe)
    }

    /// Whether `ticket` is still the latest issued for its kind
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generations.latest(ticket.kind) == ticket.sequence
    }

    /// Whether the active recipe, if any, is bookmarked
    pub fn active_recipe_liked(&self) -> bool {
        self.recipe
            .as_ref()
            .is_some_and(|recipe| self.likes.is_liked(recipe.id()))
    }
}
