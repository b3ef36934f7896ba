use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::games::hangman::game::Language;

/// `{word}` is replaced by the word being looked up.
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/{word}";

/// Why a definition is being asked for. It picks the label and the
/// fallback wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Definition,
    Hint,
}

impl Purpose {
    pub fn prefix(self) -> &'static str {
        match self {
            Purpose::Definition => "Definition: ",
            Purpose::Hint => "Hint: ",
        }
    }
}

pub fn fallback(language: Language, purpose: Purpose) -> &'static str {
    match (language, purpose) {
        (Language::English, Purpose::Definition) => "Definition not found.",
        (Language::English, Purpose::Hint) => "No hint available.",
        (Language::Spanish, Purpose::Definition) => "Definición no encontrada.",
        (Language::Spanish, Purpose::Hint) => "No hay pista disponible.",
        (Language::French, Purpose::Definition) => "Définition non trouvée.",
        (Language::French, Purpose::Hint) => "Aucun indice disponible.",
    }
}

static SPANISH_DEFINITIONS: [(&str, &str); 10] = [
    ("amor", "Sentimiento de profundo afecto."),
    ("perro", "Animal doméstico, conocido como el mejor amigo del hombre."),
    ("gato", "Animal doméstico, famoso por su independencia y agilidad."),
    ("casa", "Lugar donde se habita; un hogar."),
    ("libro", "Conjunto de hojas encuadernadas que contienen texto o imágenes."),
    ("sol", "La estrella luminosa en el centro del sistema solar."),
    ("luna", "El satélite natural que orbita la Tierra."),
    ("estrella", "Cuerpo celeste que brilla en la noche."),
    ("ciudad", "Área urbana densamente poblada."),
    ("mundo", "El planeta Tierra o la totalidad de la existencia."),
];

static FRENCH_DEFINITIONS: [(&str, &str); 10] = [
    ("amour", "Sentiment d'affection profonde."),
    ("chien", "Animal domestique, souvent considéré comme le meilleur ami de l'homme."),
    ("chat", "Animal domestique apprécié pour son indépendance."),
    ("maison", "Bâtiment dans lequel on vit, un foyer."),
    ("livre", "Ensemble de pages imprimées reliées ensemble."),
    ("soleil", "Étoile au centre de notre système solaire."),
    ("lune", "Satellite naturel de la Terre."),
    ("étoile", "Corps céleste qui brille dans le ciel nocturne."),
    ("ville", "Zone urbaine densément peuplée."),
    ("monde", "La Terre ou l'ensemble de l'existence."),
];

/// Built-in definition table, or `None` for languages looked up remotely.
fn static_table(language: Language) -> Option<&'static [(&'static str, &'static str)]> {
    match language {
        Language::English => None,
        Language::Spanish => Some(SPANISH_DEFINITIONS.as_slice()),
        Language::French => Some(FRENCH_DEFINITIONS.as_slice()),
    }
}

pub fn static_definition(language: Language, word: &str) -> Option<&'static str> {
    static_table(language)?
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, definition)| *definition)
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    definition: String,
}

/// The first meaning's first definition of the first entry.
pub fn extract_definition(entries: &[Entry]) -> Option<String> {
    let sense = entries.first()?.meanings.first()?.definitions.first()?;
    let text = sense.definition.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[derive(Debug, Clone)]
pub struct DefinitionProvider {
    client: reqwest::Client,
    url_template: String,
}

impl DefinitionProvider {
    pub fn new(client: reqwest::Client, url_template: impl Into<String>) -> Self {
        Self { client, url_template: url_template.into() }
    }

    /// Always produces text; lookups that fail in any way give the
    /// language's "not found" wording.
    pub async fn define(&self, word: &str, language: Language, purpose: Purpose) -> String {
        if static_table(language).is_some() {
            return static_definition(language, word)
                .unwrap_or_else(|| fallback(language, purpose))
                .to_string();
        }
        match self.fetch_remote(word).await {
            Ok(definition) => {
                debug!(word, "definition found");
                definition
            }
            Err(error) => {
                warn!(%error, word, "definition lookup failed");
                fallback(language, purpose).to_string()
            }
        }
    }

    fn entry_url(&self, word: &str) -> String {
        self.url_template.replace("{word}", word)
    }

    async fn fetch_remote(&self, word: &str) -> Result<String, LookupError> {
        let entries: Vec<Entry> = self
            .client
            .get(self.entry_url(word))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        extract_definition(&entries).ok_or(LookupError::Empty)
    }
}
