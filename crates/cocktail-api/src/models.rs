// Search response types
//
// Models for the `search.php?f=` endpoint. Only the display name is typed
// strictly; everything else is kept as raw JSON so one odd value in a
// record cannot fail the whole envelope.

use serde::Deserialize;
use serde_json::Value;

// ── Response Envelope ────────────────────────────────────────────────

/// Envelope returned by a first-letter search.
///
/// ```json
/// { "drinks": [ { "idDrink": "11007", "strDrink": "Margarita", ... } ] }
/// ```
///
/// The service answers `{"drinks": null}` when nothing matches; a body
/// without the key at all is treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub drinks: Option<Vec<DrinkRecord>>,
}

impl SearchResponse {
    /// Records in server order, or an empty slice when the key is missing
    /// or null.
    pub fn records(&self) -> &[DrinkRecord] {
        self.drinks.as_deref().unwrap_or_default()
    }

    /// Display names in server order. Records without a name are skipped.
    pub fn drink_names(&self) -> impl Iterator<Item = &str> {
        self.records().iter().filter_map(|d| d.name.as_deref())
    }
}

// ── Drink ────────────────────────────────────────────────────────────

/// A single cocktail record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DrinkRecord {
    #[serde(rename = "strDrink", default)]
    pub name: Option<String>,
    #[serde(rename = "idDrink", default)]
    pub id: Option<Value>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<Value>,
    #[serde(rename = "strAlcoholic", default)]
    pub alcoholic: Option<Value>,
    #[serde(rename = "strGlass", default)]
    pub glass: Option<Value>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<Value>,
    #[serde(rename = "strDrinkThumb", default)]
    pub thumbnail: Option<Value>,
    /// Catch-all: `strIngredient1`..`15`, `strMeasure1`..`15`, translations.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
