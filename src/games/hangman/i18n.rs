use crate::games::hangman::game::Language;

/// Player-facing wording for one language.
#[derive(Debug)]
pub struct Messages {
    pub title: &'static str,
    pub wins_label: &'static str,
    pub losses_label: &'static str,
    pub language_label: &'static str,
    pub win_message: &'static str,
    pub lose_message: &'static str,
    pub leaderboard_title: &'static str,
    pub no_games: &'static str,
    pub loading: &'static str,
    pub help: &'static str,
}

static ENGLISH: Messages = Messages {
    title: "Hangman Game",
    wins_label: "Wins: ",
    losses_label: "Losses: ",
    language_label: "Language: ",
    win_message: "You win!",
    lose_message: "You lose! The word was: ",
    leaderboard_title: "Leaderboard",
    no_games: "No games played yet.",
    loading: "Fetching a word...",
    help: "[a-z] guess  [F1] hint  [F2] restart  [F3] leaderboard  [F4] language  [F5] difficulty  [F6] theme  [F7] sound  [Esc] quit",
};

static SPANISH: Messages = Messages {
    title: "Juego del Ahorcado",
    wins_label: "Victorias: ",
    losses_label: "Derrotas: ",
    language_label: "Idioma: ",
    win_message: "¡Ganaste!",
    lose_message: "¡Perdiste! La palabra era: ",
    leaderboard_title: "Tabla de Resultados",
    no_games: "Aún no hay partidas.",
    loading: "Buscando una palabra...",
    help: "[a-z] adivinar  [F1] pista  [F2] reiniciar  [F3] resultados  [F4] idioma  [F5] dificultad  [F6] tema  [F7] sonido  [Esc] salir",
};

static FRENCH: Messages = Messages {
    title: "Jeu du Pendu",
    wins_label: "Victoires: ",
    losses_label: "Défaites: ",
    language_label: "Langue: ",
    win_message: "Vous avez gagné!",
    lose_message: "Vous avez perdu! Le mot était: ",
    leaderboard_title: "Classement",
    no_games: "Aucune partie jouée.",
    loading: "Recherche d'un mot...",
    help: "[a-z] deviner  [F1] indice  [F2] redémarrer  [F3] classement  [F4] langue  [F5] difficulté  [F6] thème  [F7] son  [Esc] quitter",
};

pub fn messages(language: Language) -> &'static Messages {
    match language {
        Language::English => &ENGLISH,
        Language::Spanish => &SPANISH,
        Language::French => &FRENCH,
    }
}
