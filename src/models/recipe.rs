use crate::error::Result;
use crate::models::api::RecipeDetail;
use crate::models::ingredient::{self, IngredientLine};
use crate::service::RecipeService;

/// Servings assumed when the source does not report any
pub const DEFAULT_SERVINGS: u32 = 4;

/// Baseline minutes for any recipe before ingredient count is considered
const BASE_PREP_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsDirection {
    Increase,
    Decrease,
}

/// The recipe currently selected for viewing
///
/// Created empty from an id, populated once by [`Recipe::load`], then
/// `ingredients` are derived from the raw lines. After that, servings and
/// quantities only change through [`Recipe::rescale_servings`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id: String,
    title: String,
    author: String,
    img: String,
    source_url: Option<String>,
    source_ingredient_lines: Vec<String>,
    ingredients: Vec<IngredientLine>,
    servings: u32,
    prep_time_minutes: Option<u32>,
    baseline: Baseline,
}

/// Parsed quantities at the servings count the source was written for
///
/// Rescaling always starts from here, so repeated up/down steps cannot drift.
#[derive(Debug, Clone, PartialEq)]
struct Baseline {
    servings: u32,
    quantities: Vec<Option<f64>>,
}

impl Recipe {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            author: String::new(),
            img: String::new(),
            source_url: None,
            source_ingredient_lines: Vec::new(),
            ingredients: Vec::new(),
            servings: DEFAULT_SERVINGS,
            prep_time_minutes: None,
            baseline: Baseline {
                servings: DEFAULT_SERVINGS,
                quantities: Vec::new(),
            },
        }
    }

    /// Build a loaded (but not yet derived) recipe from a detail record
    pub fn from_detail(detail: RecipeDetail) -> Self {
        let mut recipe = Recipe::new(detail.id.clone());
        recipe.populate(detail);
        recipe
    }

    /// Fetch this recipe's raw data from the remote service
    ///
    /// Fields are only written once the fetch succeeds; a failure leaves the
    /// recipe as it was and is returned to the caller without retrying.
    pub async fn load(&mut self, service: &dyn RecipeService) -> Result<()> {
        let detail = service.get_recipe(&self.id).await?;
        self.populate(detail);
        Ok(())
    }

    fn populate(&mut self, detail: RecipeDetail) {
        let servings = detail.servings.unwrap_or(DEFAULT_SERVINGS).max(1);

        self.title = detail.title;
        self.author = detail.author;
        self.img = detail.img;
        self.source_url = detail.source_url;
        self.source_ingredient_lines = detail.ingredient_lines;
        self.ingredients = Vec::new();
        self.servings = servings;
        self.prep_time_minutes = detail.prep_time_minutes;
        self.baseline = Baseline {
            servings,
            quantities: Vec::new(),
        };
    }

    /// Parse every raw ingredient line, in source order
    ///
    /// Quantities are expressed for the current servings count, so deriving
    /// again after a rescale yields the same list as before.
    pub fn derive_ingredients(&mut self) {
        let parsed: Vec<IngredientLine> = self
            .source_ingredient_lines
            .iter()
            .map(|line| ingredient::parse(line))
            .collect();

        self.baseline.quantities = parsed.iter().map(|line| line.quantity).collect();
        self.ingredients = parsed;
        self.apply_scale();
    }

    /// Heuristic preparation time: 15 minutes plus 3 for every full group of
    /// three ingredients. Not taken from source data.
    pub fn estimate_prep_time(&mut self) -> u32 {
        let count = self.source_ingredient_lines.len() as u32;
        let minutes = BASE_PREP_MINUTES + 3 * (count / 3);
        self.prep_time_minutes = Some(minutes);
        minutes
    }

    /// Step servings up or down by one and scale quantities to match
    ///
    /// Decreasing at one serving does nothing. Returns whether anything
    /// changed.
    pub fn rescale_servings(&mut self, direction: ServingsDirection) -> bool {
        let servings = match direction {
            ServingsDirection::Increase => self.servings.saturating_add(1),
            ServingsDirection::Decrease if self.servings <= 1 => return false,
            ServingsDirection::Decrease => self.servings - 1,
        };

        if servings == self.servings {
            return false;
        }

        self.servings = servings;
        self.apply_scale();
        true
    }

    fn apply_scale(&mut self) {
        let ratio = self.servings as f64 / self.baseline.servings as f64;

        for (line, base) in self.ingredients.iter_mut().zip(&self.baseline.quantities) {
            line.quantity = base.map(|quantity| quantity * ratio);
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn img(&self) -> &str {
        &self.img
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn source_ingredient_lines(&self) -> &[String] {
        &self.source_ingredient_lines
    }

    pub fn ingredients(&self) -> &[IngredientLine] {
        &self.ingredients
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    /// Reported by the source, or estimated; `None` before either happens
    pub fn prep_time_minutes(&self) -> Option<u32> {
        self.prep_time_minutes
    }
}
